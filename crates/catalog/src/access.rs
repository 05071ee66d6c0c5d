//! Which screen a session may see.

use std::fmt;

use crate::state::AuthState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
  Login,
  Search,
  Admin,
}

impl Route {
  pub fn path(&self) -> &'static str {
    match self {
      Route::Login => "/login",
      Route::Search => "/search",
      Route::Admin => "/admin",
    }
  }

  fn requires_auth(&self) -> bool {
    !matches!(self, Route::Login)
  }

  fn requires_admin(&self) -> bool {
    matches!(self, Route::Admin)
  }
}

impl fmt::Display for Route {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.path())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
  /// The session check has not finished yet
  Wait,
  Render(Route),
  Redirect(Route),
}

/// Resolve a requested path against the current session.
///
/// `/` and unknown paths always redirect to search.
pub fn resolve(path: &str, auth: &AuthState) -> Navigation {
  let route = match path.trim_end_matches('/') {
    "/login" => Route::Login,
    "/search" => Route::Search,
    "/admin" => Route::Admin,
    _ => return Navigation::Redirect(Route::Search),
  };
  guard(route, auth)
}

/// Apply the access rules for a known route.
pub fn guard(route: Route, auth: &AuthState) -> Navigation {
  if !route.requires_auth() {
    return Navigation::Render(route);
  }
  if auth.loading {
    return Navigation::Wait;
  }
  if !auth.is_authenticated {
    return Navigation::Redirect(Route::Login);
  }
  if route.requires_admin() && !auth.is_admin {
    return Navigation::Redirect(Route::Search);
  }
  Navigation::Render(route)
}
