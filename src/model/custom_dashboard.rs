use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// A parameter exposed by a custom dashboard (e.g. a simulation selector).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomDashboardParameter {
    pub parameter_id: String,
    pub parameter_name: String,
    pub parameter_type: String,
}

/// A user-built dashboard listed under the workspace settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomDashboard {
    pub custom_dashboard_id: String,
    pub custom_dashboard_name: String,
    #[serde(default)]
    pub custom_dashboard_description: Option<String>,
    #[serde(default)]
    pub custom_dashboard_parameters: Option<Vec<CustomDashboardParameter>>,
}

/// Payload for creating or updating a custom dashboard.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomDashboardInput {
    pub custom_dashboard_name: String,
    pub custom_dashboard_description: String,
    pub custom_dashboard_parameters: Vec<CustomDashboardParameter>,
}

impl CustomDashboard {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            custom_dashboard_id: id.into(),
            custom_dashboard_name: name.into(),
            custom_dashboard_description: None,
            custom_dashboard_parameters: None,
        }
    }
}

impl Entity for CustomDashboard {
    type Input = CustomDashboardInput;

    const KIND: &'static str = "custom dashboard";

    fn entity_id(&self) -> &str {
        &self.custom_dashboard_id
    }

    fn label(&self) -> &str {
        &self.custom_dashboard_name
    }

    fn initial_values(&self) -> CustomDashboardInput {
        CustomDashboardInput {
            custom_dashboard_name: self.custom_dashboard_name.clone(),
            custom_dashboard_description: self
                .custom_dashboard_description
                .clone()
                .unwrap_or_default(),
            custom_dashboard_parameters: self
                .custom_dashboard_parameters
                .clone()
                .unwrap_or_default(),
        }
    }

    fn from_input(id: String, input: CustomDashboardInput) -> Result<Self, String> {
        let mut dashboard = Self::new(id, String::new());
        dashboard.apply(input)?;
        Ok(dashboard)
    }

    fn apply(&mut self, input: CustomDashboardInput) -> Result<(), String> {
        if input.custom_dashboard_name.trim().is_empty() {
            return Err("custom_dashboard_name must not be empty".to_string());
        }
        self.custom_dashboard_name = input.custom_dashboard_name;
        self.custom_dashboard_description = Some(input.custom_dashboard_description)
            .filter(|description| !description.is_empty());
        self.custom_dashboard_parameters = Some(input.custom_dashboard_parameters);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_values_default_missing_fields() {
        let dashboard = CustomDashboard::new("d1", "Overview");
        let values = dashboard.initial_values();
        assert_eq!(values.custom_dashboard_name, "Overview");
        assert_eq!(values.custom_dashboard_description, "");
        assert!(values.custom_dashboard_parameters.is_empty());
    }

    #[test]
    fn apply_rejects_blank_name() {
        let mut dashboard = CustomDashboard::new("d1", "Overview");
        let input = CustomDashboardInput {
            custom_dashboard_name: "   ".into(),
            ..Default::default()
        };
        assert!(dashboard.apply(input).is_err());
        assert_eq!(dashboard.custom_dashboard_name, "Overview");
    }
}
