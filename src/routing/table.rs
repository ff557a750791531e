//! # Route Table
//!
//! An ordered, immutable list of mappings plus the pure functions that match
//! a path against it.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::decl::RouteDecl;
use super::error::RouteError;
use super::path;

/// Path of the catch-all entry.
pub const CATCH_ALL: &str = "*";

/// Upper bound on redirect hops followed by [`RouteTable::dispatch`].
pub const MAX_REDIRECTS: usize = 8;

/// What an entry does once selected.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteTarget<P> {
    Panel(P),
    /// Absolute, normalised destination.
    Redirect(String),
    /// Only carried by the catch-all entry.
    NotFound,
}

/// One entry of a built table.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMapping<P> {
    path: String,
    target: RouteTarget<P>,
}

impl<P> RouteMapping<P> {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn target(&self) -> &RouteTarget<P> {
        &self.target
    }

    pub fn is_catch_all(&self) -> bool {
        matches!(self.target, RouteTarget::NotFound)
    }

    fn matches(&self, normalized: &str) -> bool {
        self.is_catch_all() || path::same(&self.path, normalized)
    }
}

/// Result of matching one path, without following redirects.
#[derive(Debug, PartialEq)]
pub enum Resolution<'a, P> {
    Render(&'a P),
    Redirect(String),
    NotFound,
}

/// Terminal outcome of a dispatch.
#[derive(Debug, PartialEq)]
pub enum Outcome<'a, P> {
    Render(&'a P),
    NotFound,
}

/// Result of [`RouteTable::dispatch`].
#[derive(Debug, PartialEq)]
pub struct Dispatch<'a, P> {
    /// Path finally displayed, after redirects.
    pub path: String,
    pub outcome: Outcome<'a, P>,
    /// Redirect hops taken to get there.
    pub redirects: usize,
}

/// Immutable, validated route table.
///
/// First match wins. Building guarantees a trailing catch-all, unique paths
/// and redirects that end on a panel, so every path dispatches to exactly one
/// outcome.
#[derive(Debug, Clone)]
pub struct RouteTable<P> {
    mappings: Vec<RouteMapping<P>>,
}

impl<P> RouteTable<P> {
    pub fn builder() -> RouteTableBuilder<P> {
        RouteTableBuilder {
            entries: Vec::new(),
        }
    }

    /// Builds a table from configuration entries, turning panel names into
    /// panels with `bind`.
    pub fn from_decls(
        decls: &[RouteDecl],
        bind: impl Fn(&str) -> Option<P>,
    ) -> Result<Self, RouteError> {
        let mut builder = Self::builder();
        for decl in decls {
            builder = match (&decl.redirect, &decl.panel) {
                (Some(to), None) => builder.redirect(&decl.path, to),
                (None, Some(name)) => {
                    let panel = bind(name.as_str()).ok_or_else(|| RouteError::UnknownPanel {
                        path: decl.path.clone(),
                        panel: name.clone(),
                    })?;
                    builder.panel(&decl.path, panel)
                }
                (None, None) if decl.path == CATCH_ALL => builder.not_found(),
                (None, None) => {
                    return Err(RouteError::InvalidDecl {
                        path: decl.path.clone(),
                        reason: "needs a panel or a redirect".to_string(),
                    })
                }
                (Some(_), Some(_)) => {
                    return Err(RouteError::InvalidDecl {
                        path: decl.path.clone(),
                        reason: "declares both a panel and a redirect".to_string(),
                    })
                }
            };
        }
        builder.build()
    }

    pub fn mappings(&self) -> &[RouteMapping<P>] {
        &self.mappings
    }

    /// Matches `path` against the table, first match wins.
    pub fn resolve(&self, path: &str) -> Resolution<'_, P> {
        let normalized = path::normalize(path);
        match self
            .mappings
            .iter()
            .find(|mapping| mapping.matches(&normalized))
            .map(RouteMapping::target)
        {
            Some(RouteTarget::Panel(panel)) => Resolution::Render(panel),
            Some(RouteTarget::Redirect(to)) => Resolution::Redirect(to.clone()),
            Some(RouteTarget::NotFound) | None => Resolution::NotFound,
        }
    }

    /// Resolves `path`, following redirects until a panel or not-found.
    pub fn dispatch(&self, path: &str) -> Dispatch<'_, P> {
        let requested = path::normalize(path);
        let mut current = requested.clone();
        let mut redirects = 0;

        let outcome = loop {
            match self.resolve(&current) {
                Resolution::Render(panel) => break Outcome::Render(panel),
                Resolution::NotFound => break Outcome::NotFound,
                Resolution::Redirect(_) if redirects == MAX_REDIRECTS => {
                    warn!(path = %requested, redirects, "Redirect budget exhausted");
                    break Outcome::NotFound;
                }
                Resolution::Redirect(to) => {
                    redirects += 1;
                    current = to;
                }
            }
        };

        debug!(
            path = %requested,
            resolved = %current,
            redirects,
            found = matches!(outcome, Outcome::Render(_)),
            "Dispatched"
        );
        Dispatch {
            path: current,
            outcome,
            redirects,
        }
    }
}

enum Declared<P> {
    Panel(P),
    Redirect(String),
    CatchAll,
}

/// Collects entries in order; [`build`](Self::build) checks them.
pub struct RouteTableBuilder<P> {
    entries: Vec<(String, Declared<P>)>,
}

impl<P> RouteTableBuilder<P> {
    pub fn panel(mut self, path: &str, panel: P) -> Self {
        self.entries.push((path.to_string(), Declared::Panel(panel)));
        self
    }

    /// Declares a default redirect; `to` is relative to `path`.
    pub fn redirect(mut self, path: &str, to: &str) -> Self {
        self.entries
            .push((path.to_string(), Declared::Redirect(to.to_string())));
        self
    }

    /// Declares the catch-all not-found entry.
    pub fn not_found(mut self) -> Self {
        self.entries.push((CATCH_ALL.to_string(), Declared::CatchAll));
        self
    }

    pub fn build(self) -> Result<RouteTable<P>, RouteError> {
        let last = self.entries.len().checked_sub(1);
        let mut catch_all_seen = false;
        let mut seen = HashSet::new();
        let mut mappings = Vec::with_capacity(self.entries.len());

        for (index, (raw, declared)) in self.entries.into_iter().enumerate() {
            let normalized = path::normalize(&raw);
            let target = match declared {
                Declared::CatchAll => {
                    if catch_all_seen || Some(index) != last {
                        return Err(RouteError::CatchAllNotLast);
                    }
                    catch_all_seen = true;
                    RouteTarget::NotFound
                }
                _ if normalized == CATCH_ALL => {
                    return Err(RouteError::InvalidDecl {
                        path: raw,
                        reason: "the catch-all entry renders the not-found page".to_string(),
                    })
                }
                Declared::Panel(panel) => RouteTarget::Panel(panel),
                Declared::Redirect(to) => RouteTarget::Redirect(path::join(&normalized, &to)),
            };

            if !matches!(target, RouteTarget::NotFound)
                && !seen.insert(normalized.to_ascii_lowercase())
            {
                return Err(RouteError::DuplicatePath(normalized));
            }
            mappings.push(RouteMapping {
                path: normalized,
                target,
            });
        }

        if !catch_all_seen {
            return Err(RouteError::MissingCatchAll);
        }

        let table = RouteTable { mappings };
        table.check_redirects()?;
        Ok(table)
    }
}

impl<P> RouteTable<P> {
    /// Every redirect must land on a panel within the hop budget.
    fn check_redirects(&self) -> Result<(), RouteError> {
        for mapping in &self.mappings {
            let RouteTarget::Redirect(to) = &mapping.target else {
                continue;
            };

            let mut current = to.clone();
            let mut hops = 1;
            loop {
                match self.resolve(&current) {
                    Resolution::Render(_) => break,
                    Resolution::NotFound => {
                        return Err(RouteError::DanglingRedirect {
                            from: mapping.path.clone(),
                            to: to.clone(),
                        })
                    }
                    Resolution::Redirect(_) if hops == MAX_REDIRECTS => {
                        return Err(RouteError::RedirectLoop(mapping.path.clone()))
                    }
                    Resolution::Redirect(next) => {
                        hops += 1;
                        current = next;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Panel {
        Parameters,
        Groups,
        Users,
    }

    fn table() -> RouteTable<Panel> {
        RouteTable::builder()
            .redirect("", "parameters")
            .panel("parameters", Panel::Parameters)
            .redirect("security", "groups")
            .panel("security/groups", Panel::Groups)
            .panel("security/users", Panel::Users)
            .not_found()
            .build()
            .unwrap()
    }

    #[test]
    fn resolve_is_a_single_step() {
        let table = table();
        assert_eq!(table.resolve(""), Resolution::Redirect("parameters".into()));
        assert_eq!(table.resolve("security"), Resolution::Redirect("security/groups".into()));
        assert_eq!(table.resolve("security/users"), Resolution::Render(&Panel::Users));
        assert_eq!(table.resolve("nope"), Resolution::NotFound);
    }

    #[test]
    fn matching_ignores_slashes_and_case() {
        let table = table();
        assert_eq!(table.resolve("/Security/Users/"), Resolution::Render(&Panel::Users));
    }

    #[test]
    fn sub_path_of_a_redirecting_parent_is_not_found() {
        let table = table();
        let dispatch = table.dispatch("security/unknown");
        assert_eq!(dispatch.outcome, Outcome::NotFound);
        assert_eq!(dispatch.redirects, 0);
    }

    #[test]
    fn dispatch_follows_a_chain_of_redirects() {
        let table = RouteTable::builder()
            .redirect("", "security")
            .redirect("security", "groups")
            .panel("security/groups", Panel::Groups)
            .not_found()
            .build()
            .unwrap();

        let dispatch = table.dispatch("/");
        assert_eq!(dispatch.outcome, Outcome::Render(&Panel::Groups));
        assert_eq!(dispatch.path, "security/groups");
        assert_eq!(dispatch.redirects, 2);
    }

    /// `hops` redirect entries `r0 -> r1 -> ... -> end`, then the panel.
    fn chain(hops: usize) -> Result<RouteTable<Panel>, RouteError> {
        let mut builder = RouteTable::builder();
        for i in 0..hops {
            let next = if i + 1 == hops { "/end".to_string() } else { format!("/r{}", i + 1) };
            builder = builder.redirect(&format!("r{}", i), &next);
        }
        builder.panel("end", Panel::Parameters).not_found().build()
    }

    #[test]
    fn redirect_chains_are_bounded() {
        let table = chain(MAX_REDIRECTS).unwrap();
        let dispatch = table.dispatch("r0");
        assert_eq!(dispatch.outcome, Outcome::Render(&Panel::Parameters));
        assert_eq!(dispatch.path, "end");
        assert_eq!(dispatch.redirects, MAX_REDIRECTS);

        assert_eq!(
            chain(MAX_REDIRECTS + 1).unwrap_err(),
            RouteError::RedirectLoop("r0".into())
        );
    }

    #[test]
    fn first_match_wins() {
        let table = RouteTable::builder()
            .panel("parameters", Panel::Parameters)
            .panel("security/groups", Panel::Groups)
            .not_found()
            .build()
            .unwrap();
        let paths: Vec<&str> = table.mappings().iter().map(RouteMapping::path).collect();
        assert_eq!(paths, vec!["parameters", "security/groups", "*"]);
        assert_eq!(table.resolve("parameters"), Resolution::Render(&Panel::Parameters));
    }

    #[test]
    fn build_requires_a_trailing_catch_all() {
        let missing = RouteTable::builder().panel("parameters", Panel::Parameters).build();
        assert_eq!(missing.unwrap_err(), RouteError::MissingCatchAll);

        let misplaced = RouteTable::builder()
            .not_found()
            .panel("parameters", Panel::Parameters)
            .build();
        assert_eq!(misplaced.unwrap_err(), RouteError::CatchAllNotLast);

        let twice = RouteTable::<Panel>::builder().not_found().not_found().build();
        assert_eq!(twice.unwrap_err(), RouteError::CatchAllNotLast);
    }

    #[test]
    fn build_rejects_duplicate_paths() {
        let result = RouteTable::builder()
            .redirect("security", "groups")
            .panel("security/groups", Panel::Groups)
            .panel("/Security/", Panel::Users)
            .not_found()
            .build();
        assert_eq!(result.unwrap_err(), RouteError::DuplicatePath("Security".into()));
    }

    #[test]
    fn build_rejects_bad_redirects() {
        let dangling = RouteTable::<Panel>::builder()
            .redirect("security", "nowhere")
            .not_found()
            .build();
        assert_eq!(
            dangling.unwrap_err(),
            RouteError::DanglingRedirect {
                from: "security".into(),
                to: "security/nowhere".into()
            }
        );

        let looping = RouteTable::<Panel>::builder()
            .redirect("a", "/b")
            .redirect("b", "/a")
            .not_found()
            .build();
        assert_eq!(looping.unwrap_err(), RouteError::RedirectLoop("a".into()));
    }

    #[test]
    fn from_decls_binds_panel_names() {
        let decls = vec![
            RouteDecl {
                path: "".into(),
                redirect: Some("parameters".into()),
                panel: None,
            },
            RouteDecl {
                path: "parameters".into(),
                redirect: None,
                panel: Some("parameters".into()),
            },
            RouteDecl {
                path: "*".into(),
                redirect: None,
                panel: None,
            },
        ];
        let bind = |name: &str| (name == "parameters").then_some(Panel::Parameters);

        let table = RouteTable::from_decls(&decls, bind).unwrap();
        assert_eq!(table.dispatch("").outcome, Outcome::Render(&Panel::Parameters));

        let mut unknown = decls.clone();
        unknown[1].panel = Some("params".into());
        assert_eq!(
            RouteTable::from_decls(&unknown, bind).unwrap_err(),
            RouteError::UnknownPanel {
                path: "parameters".into(),
                panel: "params".into()
            }
        );

        let mut both = decls;
        both[1].redirect = Some("elsewhere".into());
        assert!(matches!(
            RouteTable::from_decls(&both, bind),
            Err(RouteError::InvalidDecl { .. })
        ));
    }
}
