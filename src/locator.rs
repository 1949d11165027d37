use thiserror::Error;

use crate::{
    protocol::{A11Y_BUS_INTERFACE, A11Y_BUS_PATH, A11Y_BUS_SERVICE},
    traits::ServiceLocator,
    types::{BusAddress, BusAddressParseError},
};

#[zbus::proxy(
    interface = "org.a11y.Bus",
    default_service = "org.a11y.Bus",
    default_path = "/org/a11y/bus"
)]
pub trait A11yBus {
    fn get_address(&self) -> zbus::Result<String>;
}

#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("connecting to the session bus")]
    SessionBus(#[source] zbus::Error),
    #[error(
        "calling {iface}.GetAddress on {service} at {path}",
        iface = A11Y_BUS_INTERFACE,
        service = A11Y_BUS_SERVICE,
        path = A11Y_BUS_PATH
    )]
    AddressQuery(#[source] zbus::Error),
    #[error("accessibility bus address is invalid")]
    InvalidAddress(#[from] BusAddressParseError),
    #[error("connecting to accessibility bus at {address}")]
    Connect {
        address: BusAddress,
        #[source]
        source: zbus::Error,
    },
}

/// Locates the accessibility bus through the session bus launcher, unless an
/// address was supplied up front.
#[derive(Debug, Clone, Default)]
pub struct A11yBusLocator {
    address_override: Option<BusAddress>,
}

impl A11yBusLocator {
    pub fn new(address_override: Option<BusAddress>) -> Self {
        Self { address_override }
    }

    pub async fn resolve_address(&self) -> Result<BusAddress, LocatorError> {
        match &self.address_override {
            Some(address) => {
                tracing::info!(%address, "using configured accessibility bus address");
                Ok(address.clone())
            }
            None => query_bus_address().await,
        }
    }
}

/// Asks the session bus launcher for the accessibility bus address. The
/// session connection is dropped before returning.
pub async fn query_bus_address() -> Result<BusAddress, LocatorError> {
    let session = zbus::Connection::session()
        .await
        .map_err(LocatorError::SessionBus)?;
    let launcher = A11yBusProxy::new(&session)
        .await
        .map_err(LocatorError::AddressQuery)?;
    let raw = launcher
        .get_address()
        .await
        .map_err(LocatorError::AddressQuery)?;
    let address: BusAddress = raw.parse()?;
    tracing::info!(%address, "resolved accessibility bus address");
    Ok(address)
}

/// Opens an authenticated message-bus connection directly to `address`.
pub async fn connect(address: &BusAddress) -> Result<zbus::Connection, LocatorError> {
    let to_err = |source: zbus::Error| LocatorError::Connect {
        address: address.clone(),
        source,
    };
    let connection = zbus::connection::Builder::address(address.as_str())
        .map_err(to_err)?
        .build()
        .await
        .map_err(to_err)?;
    tracing::info!(
        %address,
        unique_name = ?connection.unique_name().map(|n| n.as_str()),
        "connected to accessibility bus"
    );
    Ok(connection)
}

impl ServiceLocator for A11yBusLocator {
    type Connection = zbus::Connection;

    async fn resolve_and_connect(&self) -> Result<zbus::Connection, LocatorError> {
        let address = self.resolve_address().await?;
        connect(&address).await
    }
}
