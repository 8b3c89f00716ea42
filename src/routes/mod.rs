/// Router Module Index
///
/// Routes are grouped by access level so the admin guard is applied to a whole
/// router at once and never forgotten on a single endpoint.

/// Routes open to anyone: public JSON reads and the maintenance stub.
pub mod public;

/// Routes behind the admin guard. Every handler also takes `AdminUser`.
pub mod admin;

/// Server-rendered page shells.
pub mod pages;
