//! # JSON Reporting Module / JSON 报告模块
//!
//! Machine-readable rendering of a launch plan for `--dry-run --json`.
//!
//! 为 `--dry-run --json` 提供启动计划的机器可读输出。

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::error::LaunchError;
use crate::core::models::{LaunchPlan, Notice};

/// The JSON document describing a resolved launch.
/// 描述已解析启动的 JSON 文档。
#[derive(Debug, Serialize)]
pub struct PlanReport<'a> {
    #[serde(flatten)]
    pub plan: &'a LaunchPlan,
    /// The joined classpath exactly as passed to `-cp`.
    pub classpath_string: String,
    /// The complete argument vector, program first.
    pub argv: Vec<String>,
    pub notices: &'a [Notice],
}

/// Builds the report for `plan`.
pub fn plan_report(plan: &LaunchPlan) -> Result<PlanReport<'_>, LaunchError> {
    Ok(PlanReport {
        plan,
        classpath_string: plan.classpath.render()?.to_string_lossy().into_owned(),
        argv: plan
            .argv()?
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect(),
        notices: &plan.notices,
    })
}

/// Prints the plan as pretty JSON on stdout.
pub fn print_plan_json(plan: &LaunchPlan) -> anyhow::Result<()> {
    let report = plan_report(plan)?;
    let env: BTreeMap<_, _> = plan.env.iter().cloned().collect();
    let mut value = serde_json::to_value(&report)?;
    // Objects read better than the pair list used internally.
    value["env"] = serde_json::to_value(env)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
