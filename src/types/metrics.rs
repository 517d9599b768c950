use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Points {
    pub committed: i64,
    pub completed: i64,
    pub planned_completed: i64,
    pub unplanned_completed: i64,
    pub feature_completed: i64,
    pub optimization_completed: i64,
    pub not_completed: i64,
    pub removed: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Items {
    pub committed: u32,
    pub completed: u32,
    pub planned_completed: u32,
    pub unplanned_completed: u32,
    pub stories_completed: u32,
    pub unplanned_stories_completed: u32,
    pub bugs_completed: u32,
    pub unplanned_bugs_completed: u32,
    pub not_completed: u32,
    pub removed: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssueKeys {
    pub committed: Vec<String>,
    pub completed: Vec<String>,
    pub incomplete: Vec<String>,
    pub removed: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Meta {
    pub predictability: i64,
    pub predictability_of_commitments: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsResult {
    pub points: Points,
    pub items: Items,
    pub issue_keys: IssueKeys,
    pub meta: Meta,
}
