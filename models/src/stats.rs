use serde::{Deserialize, Serialize};

/// Historical resolution figures for one ticket category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentStats {
    pub top_depts: Vec<String>,
    #[serde(default)]
    pub avg_steps: Option<f64>,
    #[serde(default)]
    pub avg_resolution_time: Option<f64>,
}

impl DepartmentStats {
    /// One-line resolution forecast, falling back to vague wording where a
    /// figure is missing.
    pub fn forecast(&self) -> String {
        let steps = self
            .avg_steps
            .map(|s| format!("{s:.0}"))
            .unwrap_or_else(|| "several".into());
        let hours = self
            .avg_resolution_time
            .map(|h| format!("{h:.0}"))
            .unwrap_or_else(|| "a few".into());
        format!(
            "This will likely take {steps} steps, involve {}, and be resolved in ~{hours} hours.",
            self.top_depts.join(" & ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_with_and_without_figures() {
        let full: DepartmentStats = serde_json::from_str(
            r#"{"topDepts":["IT","Facilities"],"avgSteps":4,"avgResolutionTime":12.4}"#,
        )
        .unwrap();
        assert_eq!(
            full.forecast(),
            "This will likely take 4 steps, involve IT & Facilities, and be resolved in ~12 hours."
        );

        let sparse: DepartmentStats = serde_json::from_str(r#"{"topDepts":["HR"]}"#).unwrap();
        assert_eq!(
            sparse.forecast(),
            "This will likely take several steps, involve HR, and be resolved in ~a few hours."
        );
    }

    #[test]
    fn missing_departments_is_malformed() {
        assert!(serde_json::from_str::<DepartmentStats>(r#"{"avgSteps":3}"#).is_err());
    }
}
