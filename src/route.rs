//! Route-to-view resolution
//!
//! Maps a URL path to the page it shows, the shell around it, and which
//! navigation entry is highlighted. Resolution is stateless: the active entry
//! is always recomputed from the path and never stored on its own.

use std::fmt;
use std::str::FromStr;

use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};

/// One entry of a shell's navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
}

pub const SUPER_ADMIN_NAV: [NavItem; 4] = [
    NavItem { name: "Overview", href: "/super-admin/dashboard" },
    NavItem { name: "Studios", href: "/super-admin/studios" },
    NavItem { name: "Analytics", href: "/super-admin/analytics" },
    NavItem { name: "Settings", href: "/super-admin/settings" },
];

pub const STUDIO_NAV: [NavItem; 5] = [
    NavItem { name: "Dashboard", href: "/studio/dashboard" },
    NavItem { name: "My Events", href: "/studio/events" },
    NavItem { name: "All Photos", href: "/studio/photos" },
    NavItem { name: "Analytics", href: "/studio/analytics" },
    NavItem { name: "Customization", href: "/studio/theme" },
];

/// Persistent chrome around a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    SuperAdmin,
    Studio,
    /// Sub-shell scoped to a single event, navigated by [`EventTab`]
    EventDetails,
}

impl Shell {
    pub fn label(&self) -> &'static str {
        match self {
            Shell::SuperAdmin => "Super Admin",
            Shell::Studio => "Studio",
            Shell::EventDetails => "Event",
        }
    }
}

/// Tabs of the event-details sub-shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventTab {
    #[default]
    Photos,
    Design,
    Analytics,
    Settings,
}

impl EventTab {
    pub const ALL: [EventTab; 4] = [
        EventTab::Photos,
        EventTab::Design,
        EventTab::Analytics,
        EventTab::Settings,
    ];

    pub fn segment(&self) -> &'static str {
        match self {
            EventTab::Photos => "photos",
            EventTab::Design => "design",
            EventTab::Analytics => "analytics",
            EventTab::Settings => "settings",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventTab::Photos => "Photos",
            EventTab::Design => "Design",
            EventTab::Analytics => "Analytics",
            EventTab::Settings => "Settings",
        }
    }

    /// Path a tab navigation action rewrites the URL to
    pub fn href(&self, event_id: i64) -> String {
        format!("/studio/events/{}/{}", event_id, self.segment())
    }

    /// Tab selected by a path's last segment
    pub fn from_path(path: &str) -> Self {
        normalize(path)
            .last()
            .map(|segment| PathSegment::parse(segment).into())
            .unwrap_or_default()
    }
}

impl fmt::Display for EventTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for EventTab {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        EventTab::ALL
            .into_iter()
            .find(|tab| tab.segment().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown tab '{}', expected photos, design, analytics or settings", s))
    }
}

/// Trailing path segment of an event-details URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathSegment {
    Photos,
    Design,
    Analytics,
    Settings,
    Other,
}

impl PathSegment {
    fn parse(segment: &str) -> Self {
        match segment {
            "photos" => PathSegment::Photos,
            "design" => PathSegment::Design,
            "analytics" => PathSegment::Analytics,
            "settings" => PathSegment::Settings,
            _ => PathSegment::Other,
        }
    }
}

impl From<PathSegment> for EventTab {
    fn from(segment: PathSegment) -> Self {
        match segment {
            PathSegment::Design => EventTab::Design,
            PathSegment::Analytics => EventTab::Analytics,
            PathSegment::Settings => EventTab::Settings,
            PathSegment::Photos | PathSegment::Other => EventTab::Photos,
        }
    }
}

/// A page reachable by path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    SuperAdminDashboard,
    SuperAdminStudios,
    StudioDashboard,
    StudioEvents,
    StudioPhotos,
    EventDetails { event_id: i64, tab: EventTab },
    /// Guest-facing gallery; `None` is the demo gallery
    EventGallery { event_id: Option<i64> },
}

impl Route {
    pub fn shell(&self) -> Option<Shell> {
        match self {
            Route::SuperAdminDashboard | Route::SuperAdminStudios => Some(Shell::SuperAdmin),
            Route::StudioDashboard | Route::StudioEvents | Route::StudioPhotos => Some(Shell::Studio),
            Route::EventDetails { .. } => Some(Shell::EventDetails),
            Route::EventGallery { .. } => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::SuperAdminDashboard => "Platform Overview",
            Route::SuperAdminStudios => "Studio Management",
            Route::StudioDashboard => "Studio Home",
            Route::StudioEvents => "Events List",
            Route::StudioPhotos => "Event Photography",
            Route::EventDetails { .. } => "Event",
            Route::EventGallery { .. } => "Gallery",
        }
    }
}

/// A rendered page and its chrome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// Normalized path the view was resolved from
    pub path: String,
    pub route: Route,
}

/// Navigation entry with its highlight computed for one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub name: &'static str,
    pub href: String,
    pub active: bool,
}

impl View {
    pub fn shell(&self) -> Option<Shell> {
        self.route.shell()
    }

    pub fn navigation(&self) -> Vec<NavEntry> {
        let role_nav = |items: &[NavItem]| -> Vec<NavEntry> {
            items
                .iter()
                .map(|item| NavEntry {
                    name: item.name,
                    href: item.href.to_string(),
                    active: is_active(item.href, &self.path),
                })
                .collect()
        };

        match &self.route {
            Route::EventDetails { event_id, tab } => EventTab::ALL
                .iter()
                .map(|candidate| NavEntry {
                    name: candidate.label(),
                    href: candidate.href(*event_id),
                    active: candidate == tab,
                })
                .collect(),
            route => match route.shell() {
                Some(Shell::SuperAdmin) => role_nav(&SUPER_ADMIN_NAV),
                Some(Shell::Studio) => role_nav(&STUDIO_NAV),
                _ => Vec::new(),
            },
        }
    }

    pub fn active_name(&self) -> Option<&'static str> {
        self.navigation()
            .into_iter()
            .find(|entry| entry.active)
            .map(|entry| entry.name)
    }
}

/// Result of resolving a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Redirect { to: String },
    View(View),
}

/// Resolves paths against the fixed route table
#[derive(Debug, Clone)]
pub struct Router {
    default_route: String,
}

impl Router {
    pub fn new(default_route: impl Into<String>) -> Self {
        Self {
            default_route: default_route.into(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.default_route.clone())
    }

    pub fn resolve(&self, path: &str) -> Result<Resolution> {
        let segments = normalize(path);
        let route = match segments.as_slice() {
            // Placeholder landing page, not derived from the caller's identity
            [] => {
                return Ok(Resolution::Redirect {
                    to: self.default_route.clone(),
                })
            }
            ["super-admin", "dashboard"] => Route::SuperAdminDashboard,
            ["super-admin", "studios"] => Route::SuperAdminStudios,
            ["studio", "dashboard"] => Route::StudioDashboard,
            ["studio", "events"] => Route::StudioEvents,
            ["studio", "photos"] => Route::StudioPhotos,
            ["studio", "events", id] => Route::EventDetails {
                event_id: parse_id(id, path)?,
                tab: EventTab::Photos,
            },
            ["studio", "events", id, _] => Route::EventDetails {
                event_id: parse_id(id, path)?,
                tab: EventTab::from_path(path),
            },
            ["event", id] => Route::EventGallery {
                event_id: Some(parse_id(id, path)?),
            },
            ["demo", "event"] => Route::EventGallery { event_id: None },
            _ => return Err(DashboardError::route_not_found(path)),
        };

        Ok(Resolution::View(View {
            path: canonical(&segments),
            route,
        }))
    }

    /// Resolve a path, following at most one redirect
    pub fn open(&self, path: &str) -> Result<View> {
        match self.resolve(path)? {
            Resolution::View(view) => Ok(view),
            Resolution::Redirect { to } => match self.resolve(&to)? {
                Resolution::View(view) => {
                    tracing::debug!(from = %path, to = %to, "redirected");
                    Ok(view)
                }
                Resolution::Redirect { .. } => Err(DashboardError::config(format!(
                    "Default route '{}' redirects again",
                    to
                ))),
            },
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

/// Path segments with query, fragment, and empty segments removed
fn normalize(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn canonical(segments: &[&str]) -> String {
    format!("/{}", segments.join("/"))
}

fn parse_id(segment: &str, path: &str) -> Result<i64> {
    segment
        .parse()
        .map_err(|_| DashboardError::route_not_found(path))
}

/// Link semantics: active on the exact path or any path below it
fn is_active(href: &str, path: &str) -> bool {
    path == href
        || path
            .strip_prefix(href)
            .map(|rest| rest.starts_with('/'))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(path: &str) -> View {
        Router::default().open(path).unwrap()
    }

    #[test]
    fn test_event_tab_from_suffix() {
        assert_eq!(EventTab::from_path("/studio/events/42/design"), EventTab::Design);
        assert_eq!(EventTab::from_path("/studio/events/42/settings"), EventTab::Settings);
        assert_eq!(EventTab::from_path("/studio/events/42/analytics"), EventTab::Analytics);
        assert_eq!(EventTab::from_path("/studio/events/42"), EventTab::Photos);
        assert_eq!(EventTab::from_path("/studio/events/42/photos"), EventTab::Photos);
        assert_eq!(EventTab::from_path("/studio/events/42/design/"), EventTab::Design);
    }

    #[test]
    fn test_event_details_resolution() {
        assert_eq!(
            view("/studio/events/42/design").route,
            Route::EventDetails {
                event_id: 42,
                tab: EventTab::Design
            }
        );
        assert_eq!(
            view("/studio/events/42").route,
            Route::EventDetails {
                event_id: 42,
                tab: EventTab::Photos
            }
        );
        assert_eq!(
            view("/studio/events/42/unknown").route,
            Route::EventDetails {
                event_id: 42,
                tab: EventTab::Photos
            }
        );
    }

    #[test]
    fn test_tab_navigation_paths() {
        assert_eq!(EventTab::Photos.href(42), "/studio/events/42/photos");
        assert_eq!(EventTab::Design.href(42), "/studio/events/42/design");

        for tab in EventTab::ALL {
            let resolved = view(&tab.href(7));
            assert_eq!(
                resolved.route,
                Route::EventDetails { event_id: 7, tab },
                "navigating to {} must land on {}",
                tab,
                tab
            );
            assert_eq!(resolved.active_name(), Some(tab.label()));
        }
    }

    #[test]
    fn test_root_redirects_to_studio_dashboard() {
        let router = Router::default();
        assert_eq!(
            router.resolve("/").unwrap(),
            Resolution::Redirect {
                to: "/studio/dashboard".to_string()
            }
        );
        assert_eq!(router.open("/").unwrap().route, Route::StudioDashboard);
        assert_eq!(router.open("").unwrap().route, Route::StudioDashboard);
    }

    #[test]
    fn test_root_redirect_is_configurable() {
        let router = Router::new("/super-admin/dashboard");
        assert_eq!(router.open("/").unwrap().route, Route::SuperAdminDashboard);
    }

    #[test]
    fn test_redirect_loop_rejected() {
        assert!(Router::new("/").open("/").is_err());
    }

    #[test]
    fn test_role_shells_and_navigation() {
        let admin = view("/super-admin/studios");
        assert_eq!(admin.shell(), Some(Shell::SuperAdmin));
        assert_eq!(admin.navigation().len(), 4);
        assert_eq!(admin.active_name(), Some("Studios"));

        let studio = view("/studio/photos");
        assert_eq!(studio.shell(), Some(Shell::Studio));
        let names: Vec<_> = studio.navigation().iter().map(|e| e.name).collect();
        assert_eq!(
            names,
            vec!["Dashboard", "My Events", "All Photos", "Analytics", "Customization"]
        );
        assert_eq!(studio.active_name(), Some("All Photos"));
    }

    #[test]
    fn test_gallery_has_no_shell() {
        let gallery = view("/event/7");
        assert_eq!(gallery.route, Route::EventGallery { event_id: Some(7) });
        assert_eq!(gallery.shell(), None);
        assert!(gallery.navigation().is_empty());

        assert_eq!(view("/demo/event").route, Route::EventGallery { event_id: None });
    }

    #[test]
    fn test_normalization() {
        assert_eq!(view("/studio/events/").route, Route::StudioEvents);
        assert_eq!(view("/studio/events?sort=new").route, Route::StudioEvents);
        assert_eq!(view("/studio//dashboard#top").path, "/studio/dashboard");
    }

    #[test]
    fn test_unknown_paths() {
        let router = Router::default();
        for path in [
            "/super-admin/analytics",
            "/studio/theme",
            "/studio/events/abc",
            "/studio/events/1/design/extra",
            "/event/",
            "/nowhere",
        ] {
            let err = router.resolve(path).unwrap_err();
            assert_eq!(err.code(), crate::error::ErrorCode::RouteNotFound, "{}", path);
        }
    }

    #[test]
    fn test_is_active_is_segment_aware() {
        assert!(is_active("/studio/events", "/studio/events"));
        assert!(is_active("/studio/events", "/studio/events/3"));
        assert!(!is_active("/studio/events", "/studio/events-archive"));
    }

    #[test]
    fn test_tab_from_str() {
        assert_eq!("Design".parse::<EventTab>().unwrap(), EventTab::Design);
        assert!("gallery".parse::<EventTab>().is_err());
    }
}
