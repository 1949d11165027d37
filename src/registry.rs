use thiserror::Error;
use zbus::{proxy::CacheProperties, zvariant::OwnedObjectPath};

use crate::{
    protocol::{ACCESSIBLE_INTERFACE, REGISTRY_SERVICE, ROOT_PATH},
    traits::{AccessibleRoot, RegistryConnection},
    types::{ApplicationList, ApplicationRef},
};

#[zbus::proxy(
    interface = "org.a11y.atspi.Accessible",
    default_service = "org.a11y.atspi.Registry",
    default_path = "/org/a11y/atspi/accessible/root"
)]
pub trait Accessible {
    fn get_children(&self) -> zbus::Result<Vec<(String, OwnedObjectPath)>>;
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("building proxy for {path} on {service}", path = ROOT_PATH, service = REGISTRY_SERVICE)]
    Bind(#[source] zbus::Error),
    #[error("{iface}.GetChildren failed", iface = ACCESSIBLE_INTERFACE)]
    ListChildren(#[source] zbus::Error),
}

fn application_list(children: Vec<(String, OwnedObjectPath)>) -> ApplicationList {
    children
        .into_iter()
        .map(|(bus_name, path)| ApplicationRef::new(bus_name, path.as_str()))
        .collect::<Vec<_>>()
        .into()
}

impl RegistryConnection for zbus::Connection {
    type Root = AccessibleProxy<'static>;

    async fn bind_root(&self) -> Result<Self::Root, RegistryError> {
        AccessibleProxy::builder(self)
            .cache_properties(CacheProperties::No)
            .build()
            .await
            .map_err(RegistryError::Bind)
    }
}

impl AccessibleRoot for AccessibleProxy<'static> {
    async fn list_children(&self) -> Result<ApplicationList, RegistryError> {
        let children = self
            .get_children()
            .await
            .map_err(RegistryError::ListChildren)?;
        tracing::debug!(count = children.len(), "registry returned children");
        Ok(application_list(children))
    }
}
