/// Launcher service on the session bus that knows where the accessibility bus lives.
pub const A11Y_BUS_SERVICE: &str = "org.a11y.Bus";
pub const A11Y_BUS_PATH: &str = "/org/a11y/bus";
pub const A11Y_BUS_INTERFACE: &str = "org.a11y.Bus";

pub const REGISTRY_SERVICE: &str = "org.a11y.atspi.Registry";
pub const ROOT_PATH: &str = "/org/a11y/atspi/accessible/root";
pub const ACCESSIBLE_INTERFACE: &str = "org.a11y.atspi.Accessible";

/// Skips the session bus lookup entirely when set to a non-empty address.
pub const BUS_ADDRESS_ENV: &str = "AT_SPI_BUS_ADDRESS";
