use std::error::Error;

type BoxError = Box<dyn Error + 'static>;

/// Failure to acquire a render surface (window, GPU adapter, device or
/// swapchain). Fatal: callers log it and terminate, there is no retry.
///
/// Carries the origin of the failure so the log names the subsystem,
/// component and operation, plus the platform error as its `source`.
#[derive(Debug, thiserror::Error)]
#[error("{message} (in {subsystem}/{component}::{operation})")]
pub struct SurfaceInitError {
    message: String,
    subsystem: &'static str,
    component: &'static str,
    operation: &'static str,
    #[source]
    source: Option<BoxError>,
}

impl SurfaceInitError {
    pub fn new(
        message: impl Into<String>,
        subsystem: &'static str,
        component: &'static str,
        operation: &'static str,
    ) -> Self {
        Self {
            message: message.into(),
            subsystem,
            component,
            operation,
            source: None,
        }
    }

    /// Attach the underlying platform error.
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn subsystem(&self) -> &'static str {
        self.subsystem
    }

    pub fn component(&self) -> &'static str {
        self.component
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// The platform error chain rendered as one line, outermost first.
    pub fn detail(&self) -> String {
        let mut parts = Vec::new();
        let mut next = self.source();
        while let Some(err) = next {
            parts.push(err.to_string());
            next = err.source();
        }
        if parts.is_empty() {
            "no further detail".into()
        } else {
            parts.join(": ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn display_names_origin() {
        let err = SurfaceInitError::new("no adapter", "render", "WindowDisplay", "create");
        let text = err.to_string();
        assert!(text.contains("no adapter"));
        assert!(text.contains("render/WindowDisplay::create"));
    }

    #[test]
    fn source_is_exposed() {
        let err = SurfaceInitError::new("window failed", "window", "WindowInput", "open")
            .with_source(io::Error::other("display server unavailable"));
        assert!(err.source().is_some());
        assert_eq!(err.detail(), "display server unavailable");
    }

    #[test]
    fn detail_without_source() {
        let err = SurfaceInitError::new("x", "render", "HeadlessDisplay", "create");
        assert!(err.source().is_none());
        assert_eq!(err.detail(), "no further detail");
        assert_eq!(err.component(), "HeadlessDisplay");
        assert_eq!(err.operation(), "create");
        assert_eq!(err.subsystem(), "render");
        assert_eq!(err.message(), "x");
    }
}
