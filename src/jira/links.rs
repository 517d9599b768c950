/// Link to an issue search that lists exactly the given keys.
pub fn issue_link<S: AsRef<str>>(base_url: &str, keys: &[S]) -> String {
    let keys = keys
        .iter()
        .map(|key| key.as_ref())
        .collect::<Vec<_>>()
        .join("%2C");
    format!(
        "{}/issues/?jql=issueKey%20in%20({keys})",
        base_url.trim_end_matches('/')
    )
}
