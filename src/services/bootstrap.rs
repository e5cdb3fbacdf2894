//! Landing-page redirect decided by the locally stored session marker.
//!
//! The marker is read once per page load. It is not validated; any
//! non-empty value sends the visitor to the members view.

/// Client-side storage key holding the session marker.
pub const SESSION_KEY: &str = "user";

pub const MEMBERS_ROUTE: &str = "/members";
pub const LOGIN_ROUTE: &str = "/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Members,
    Login,
}

impl Destination {
    pub fn path(self) -> &'static str {
        match self {
            Self::Members => MEMBERS_ROUTE,
            Self::Login => LOGIN_ROUTE,
        }
    }
}

/// Persisted key/value storage owned by the client.
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Option<String>;
}

/// Navigation performed by the hosting page.
pub trait Navigator {
    fn navigate(&mut self, path: &str);
}

/// Pick the destination for a marker value. Empty strings count as absent.
pub fn destination(marker: Option<&str>) -> Destination {
    match marker {
        Some(value) if !value.is_empty() => Destination::Members,
        _ => Destination::Login,
    }
}

/// Read the marker once and navigate exactly once.
pub fn redirect_once<S, N>(storage: &S, navigator: &mut N) -> Destination
where
    S: SessionStorage + ?Sized,
    N: Navigator + ?Sized,
{
    let marker = storage.get_item(SESSION_KEY);
    let target = destination(marker.as_deref());
    navigator.navigate(target.path());
    target
}

/// Placeholder page that performs the same check in the browser on load.
pub fn render_bootstrap_page() -> String {
    // `Value`'s Display emits a quoted, escaped JSON string literal.
    let key = serde_json::Value::from(SESSION_KEY);
    let members = serde_json::Value::from(MEMBERS_ROUTE);
    let login = serde_json::Value::from(LOGIN_ROUTE);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Redirecting...</title>
</head>
<body>
<p>Redirecting...</p>
<script>
(function () {{
  var marker = window.localStorage.getItem({key});
  window.location.replace(marker ? {members} : {login});
}})();
</script>
</body>
</html>
"#
    )
}
