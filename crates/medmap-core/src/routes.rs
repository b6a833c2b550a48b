//! # Route Table
//!
//! The navigable pages of the dashboard as one static table.
//!
//! ```text
//! ┌──────────────┬────────────────────────┬───────────────────────┐
//! │ path         │ target                 │ navigation            │
//! ├──────────────┼────────────────────────┼───────────────────────┤
//! │ /            │ redirect → /login      │ -                     │
//! │ /login       │ Login                  │ -                     │
//! │ /dashboard   │ Dashboard              │ sidebar + mobile nav  │
//! │ /requests    │ Live Requests          │ sidebar + mobile nav  │
//! │ ...          │                        │                       │
//! │ (anything)   │ Not Found              │ -                     │
//! └──────────────┴────────────────────────┴───────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use medmap_core::routes::{self, Page};
//!
//! assert_eq!(routes::resolve("/").page, Page::Login);
//! assert_eq!(routes::resolve("/beds/").page, Page::Beds);
//! assert_eq!(routes::resolve("/nowhere").page, Page::NotFound);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Pages
// =============================================================================

/// A screen of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Login,
    Dashboard,
    LiveRequests,
    Beds,
    BloodBank,
    Oxygen,
    Ambulances,
    Surgery,
    Admissions,
    Discharges,
    Patients,
    Staff,
    Pharmacy,
    Emergency,
    MedicalRecords,
    Analytics,
    Settings,
    Database,
    NotFound,
}

impl Page {
    pub const fn title(&self) -> &'static str {
        match self {
            Page::Login => "Login",
            Page::Dashboard => "Dashboard",
            Page::LiveRequests => "Live Requests",
            Page::Beds => "Beds & ICU",
            Page::BloodBank => "Blood Bank",
            Page::Oxygen => "Oxygen & Equipment",
            Page::Ambulances => "Ambulances",
            Page::Surgery => "Surgery Schedule",
            Page::Admissions => "Admissions",
            Page::Discharges => "Discharges",
            Page::Patients => "Patients",
            Page::Staff => "Staff",
            Page::Pharmacy => "Pharmacy",
            Page::Emergency => "Emergency Department",
            Page::MedicalRecords => "Medical Records",
            Page::Analytics => "Analytics",
            Page::Settings => "Settings",
            Page::Database => "Database",
            Page::NotFound => "Not Found",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// =============================================================================
// Route Table
// =============================================================================

/// What a path leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "to")]
pub enum Target {
    Page(Page),
    Redirect(&'static str),
}

/// One row of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub path: &'static str,
    pub target: Target,
    /// Label in the desktop sidebar, if listed there.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<&'static str>,
    /// Short label in the mobile bottom bar, if listed there.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<&'static str>,
}

const fn page(path: &'static str, page: Page) -> Route {
    Route {
        path,
        target: Target::Page(page),
        sidebar: None,
        mobile: None,
    }
}

const fn nav(path: &'static str, page: Page, sidebar: &'static str, mobile: &'static str) -> Route {
    Route {
        path,
        target: Target::Page(page),
        sidebar: Some(sidebar),
        mobile: Some(mobile),
    }
}

/// Every known path, in navigation order.
pub const ROUTES: &[Route] = &[
    Route {
        path: "/",
        target: Target::Redirect("/login"),
        sidebar: None,
        mobile: None,
    },
    page("/login", Page::Login),
    nav("/dashboard", Page::Dashboard, "Dashboard", "Dashboard"),
    nav("/requests", Page::LiveRequests, "Live Requests", "Requests"),
    nav("/beds", Page::Beds, "Beds & ICU", "Beds"),
    nav("/blood", Page::BloodBank, "Blood Bank", "Blood"),
    nav("/oxygen", Page::Oxygen, "Oxygen & Equipment", "Oxygen"),
    nav("/ambulances", Page::Ambulances, "Ambulances", "Fleet"),
    page("/surgery", Page::Surgery),
    page("/admissions", Page::Admissions),
    page("/discharges", Page::Discharges),
    page("/patients", Page::Patients),
    page("/staff", Page::Staff),
    page("/pharmacy", Page::Pharmacy),
    page("/emergency", Page::Emergency),
    page("/records", Page::MedicalRecords),
    page("/analytics", Page::Analytics),
    page("/settings", Page::Settings),
    page("/database", Page::Database),
];

// =============================================================================
// Resolution
// =============================================================================

/// Outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolved {
    /// The path as requested, normalized.
    pub requested: String,
    /// Where the path finally leads after at most one redirect.
    pub path: String,
    pub page: Page,
    pub redirected: bool,
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Exact lookup, no redirect following.
pub fn lookup(path: &str) -> Option<&'static Route> {
    let path = normalize(path);
    ROUTES.iter().find(|route| route.path == path)
}

/// Resolves a path to its page. A trailing slash is ignored, a redirect is
/// followed once, and unknown paths land on [`Page::NotFound`].
pub fn resolve(path: &str) -> Resolved {
    let requested = normalize(path);

    let (path, target, redirected) = match lookup(&requested).map(|r| r.target) {
        Some(Target::Redirect(to)) => (to.to_string(), lookup(to).map(|r| r.target), true),
        target => (requested.clone(), target, false),
    };

    let page = match target {
        Some(Target::Page(page)) => page,
        _ => Page::NotFound,
    };

    Resolved {
        requested,
        path,
        page,
        redirected,
    }
}

/// Sidebar entries, in order.
pub fn sidebar() -> impl Iterator<Item = &'static Route> {
    ROUTES.iter().filter(|route| route.sidebar.is_some())
}

/// Path of the route that shows `page`.
pub fn path_of(page: Page) -> Option<&'static str> {
    ROUTES
        .iter()
        .find(|route| route.target == Target::Page(page))
        .map(|route| route.path)
}

// =============================================================================
// Unit Tests
// =============================================================================
