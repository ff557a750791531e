//! # Settings Routes
//!
//! The settings section of the console: its panels and the route table that
//! selects them. The table is declared in `config/settings_routes.toml`,
//! embedded at compile time, and built once per process.

use std::fmt;
use std::sync::OnceLock;

use crate::config::{ConfigError, ConsoleConfig};
use crate::routing::RouteTable;

/// Panels reachable from the settings menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsPanel {
    Parameters,
    Groups,
    Users,
    Policies,
    Tags,
    AttackPatterns,
    KillChainPhases,
    Cves,
    XlsMappers,
    AssetRules,
    CustomDashboards,
}

impl SettingsPanel {
    pub const ALL: [SettingsPanel; 11] = [
        SettingsPanel::Parameters,
        SettingsPanel::Groups,
        SettingsPanel::Users,
        SettingsPanel::Policies,
        SettingsPanel::Tags,
        SettingsPanel::AttackPatterns,
        SettingsPanel::KillChainPhases,
        SettingsPanel::Cves,
        SettingsPanel::XlsMappers,
        SettingsPanel::AssetRules,
        SettingsPanel::CustomDashboards,
    ];

    /// Name used in route declarations.
    pub fn name(self) -> &'static str {
        match self {
            SettingsPanel::Parameters => "parameters",
            SettingsPanel::Groups => "groups",
            SettingsPanel::Users => "users",
            SettingsPanel::Policies => "policies",
            SettingsPanel::Tags => "tags",
            SettingsPanel::AttackPatterns => "attack_patterns",
            SettingsPanel::KillChainPhases => "kill_chain_phases",
            SettingsPanel::Cves => "cves",
            SettingsPanel::XlsMappers => "xls_mappers",
            SettingsPanel::AssetRules => "asset_rules",
            SettingsPanel::CustomDashboards => "custom_dashboards",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|panel| panel.name() == name)
    }
}

impl fmt::Display for SettingsPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builds a settings table from a configuration.
pub fn table_from(config: &ConsoleConfig) -> Result<RouteTable<SettingsPanel>, ConfigError> {
    Ok(RouteTable::from_decls(&config.routes, SettingsPanel::from_name)?)
}

static ROUTES: OnceLock<Result<RouteTable<SettingsPanel>, ConfigError>> = OnceLock::new();

/// The process-wide settings table, built from the embedded configuration on
/// first use.
pub fn routes() -> Result<&'static RouteTable<SettingsPanel>, ConfigError> {
    ROUTES
        .get_or_init(|| ConsoleConfig::builtin().and_then(|config| table_from(&config)))
        .as_ref()
        .map_err(Clone::clone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Outcome;

    #[test]
    fn names_round_trip() {
        for panel in SettingsPanel::ALL {
            assert_eq!(SettingsPanel::from_name(panel.name()), Some(panel));
        }
        assert_eq!(SettingsPanel::from_name("nope"), None);
    }

    #[test]
    fn every_panel_is_reachable() {
        let table = routes().unwrap();
        for panel in SettingsPanel::ALL {
            let reachable = table
                .mappings()
                .iter()
                .any(|mapping| table.dispatch(mapping.path()).outcome == Outcome::Render(&panel));
            assert!(reachable, "{panel} has no route");
        }
    }

    #[test]
    fn table_is_built_once() {
        let first = routes().unwrap() as *const _;
        let second = routes().unwrap() as *const _;
        assert_eq!(first, second);
    }
}
