/*
 * plugin.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Style registration.
//!
//! The host keeps a [`StyleRegistry`] of named style factories and picks one
//! per document build by the name in its configuration. [`setup`] registers
//! the author-year style under [`STYLE_NAME`].
//!
//! A style is constructed at most once per registry, on first lookup, and
//! then shared read-only by every render worker.

use crate::composite::CompositeStyle;
use crate::config::{HostConfig, StyleConfig};
use crate::error::{Error, Result};
use hashlink::LinkedHashMap;
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Name under which [`setup`] registers the author-year style.
pub const STYLE_NAME: &str = "author_year_round_custom";

/// Builds a style instance.
pub type StyleFactory = Arc<dyn Fn() -> CompositeStyle + Send + Sync>;

/// What the extension reports to the host after [`setup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtensionMetadata {
    pub version: &'static str,
    /// Safe to use from concurrent document reads.
    pub parallel_read_safe: bool,
}

struct Registration {
    factory: StyleFactory,
    /// Settings the factory was built from, when known.
    config: Option<StyleConfig>,
    instance: OnceCell<Arc<CompositeStyle>>,
}

/// Name → style factory registry.
#[derive(Default)]
pub struct StyleRegistry {
    styles: LinkedHashMap<String, Registration>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `name`, replacing any previous registration.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> CompositeStyle + Send + Sync + 'static,
    {
        self.insert(name.into(), Arc::new(factory), None);
    }

    fn insert(&mut self, name: String, factory: StyleFactory, config: Option<StyleConfig>) {
        let registration = Registration {
            factory,
            config,
            instance: OnceCell::new(),
        };
        if self.styles.insert(name.clone(), registration).is_some() {
            tracing::warn!(style = %name, "Replacing registered referencing style");
        } else {
            tracing::debug!(style = %name, "Registered referencing style");
        }
    }

    /// Look up a style by its exact, case-sensitive name.
    pub fn get(&self, name: &str) -> Result<Arc<CompositeStyle>> {
        let registration = self.styles.get(name).ok_or_else(|| Error::StyleNotFound {
            name: name.to_string(),
        })?;
        let style = registration.instance.get_or_init(|| {
            tracing::debug!(style = %name, "Constructing referencing style");
            Arc::new((registration.factory)().named(name))
        });
        Ok(Arc::clone(style))
    }

    /// The style a document build asks for.
    ///
    /// Only the style name is read from `host`. Its `refstyle` overrides take
    /// effect when the style was registered with them, i.e. through
    /// `setup_with(registry, host.refstyle.clone())`; a mismatch is logged.
    pub fn resolve(&self, host: &HostConfig) -> Result<Arc<CompositeStyle>> {
        if self.ignores_overrides(host) {
            tracing::warn!(
                style = %host.reference_style,
                "Host refstyle overrides differ from the registered style settings and are not applied"
            );
        }
        self.get(&host.reference_style)
    }

    /// Whether `host` carries style settings that differ from those its
    /// style was registered with.
    pub fn ignores_overrides(&self, host: &HostConfig) -> bool {
        self.styles
            .get(&host.reference_style)
            .and_then(|registration| registration.config.as_ref())
            .is_some_and(|config| *config != host.refstyle)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.styles.keys().map(String::as_str).collect()
    }
}

impl fmt::Debug for StyleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleRegistry")
            .field("styles", &self.names())
            .finish()
    }
}

/// Register the author-year style with default settings.
pub fn setup(registry: &mut StyleRegistry) -> ExtensionMetadata {
    setup_with(registry, StyleConfig::default())
}

/// Register the author-year style built from `config`.
pub fn setup_with(registry: &mut StyleRegistry, config: StyleConfig) -> ExtensionMetadata {
    let factory_config = config.clone();
    registry.insert(
        STYLE_NAME.to_string(),
        Arc::new(move || CompositeStyle::new(&factory_config)),
        Some(config),
    );
    ExtensionMetadata {
        version: "0.1",
        parallel_read_safe: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_setup_registers_style() {
        let mut registry = StyleRegistry::new();
        let metadata = setup(&mut registry);
        assert!(metadata.parallel_read_safe);
        assert_eq!(metadata.version, "0.1");
        assert_eq!(registry.names(), vec![STYLE_NAME]);
        assert_eq!(registry.get(STYLE_NAME).unwrap().name(), STYLE_NAME);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut registry = StyleRegistry::new();
        setup(&mut registry);
        let err = registry.get("Author_Year_Round_Custom").unwrap_err();
        assert!(matches!(err, Error::StyleNotFound { .. }), "Got: {:?}", err);
    }

    #[test]
    fn test_factory_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut registry = StyleRegistry::new();
        registry.register("counted", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            CompositeStyle::default()
        });

        let first = registry.get("counted").unwrap();
        let second = registry.get("counted").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_reregistering_replaces() {
        let mut registry = StyleRegistry::new();
        setup(&mut registry);
        registry.register(STYLE_NAME, || CompositeStyle::default().named("ignored"));
        assert_eq!(registry.names().len(), 1);
        // The registered name always wins over the factory's own name.
        assert_eq!(registry.get(STYLE_NAME).unwrap().name(), STYLE_NAME);
    }

    #[test]
    fn test_resolve_detects_unregistered_overrides() {
        let mut host = HostConfig::new(STYLE_NAME);
        host.refstyle.citation_sep = ", ".to_string();

        let mut registry = StyleRegistry::new();
        setup(&mut registry);
        assert!(registry.ignores_overrides(&host));
        // The registered style still renders, with its own settings.
        assert!(registry.resolve(&host).is_ok());

        let mut registry = StyleRegistry::new();
        setup_with(&mut registry, host.refstyle.clone());
        assert!(!registry.ignores_overrides(&host));
    }

    #[test]
    fn test_custom_factory_has_no_known_settings() {
        let mut registry = StyleRegistry::new();
        registry.register(STYLE_NAME, CompositeStyle::default);
        let mut host = HostConfig::new(STYLE_NAME);
        host.refstyle.citation_sep = ", ".to_string();
        assert!(!registry.ignores_overrides(&host));
    }

    #[test]
    fn test_resolve_from_host_config() {
        let mut registry = StyleRegistry::new();
        setup(&mut registry);
        let host = HostConfig::new(STYLE_NAME);
        assert!(registry.resolve(&host).is_ok());
        assert!(registry.resolve(&HostConfig::new("label")).is_err());
    }
}
