use derive_more::Display;

/// The hub's one-line status readout.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Status {
    #[display("SYSTEM BOOT...")]
    Boot,
    #[display("LOADING LIBRARIES...")]
    Loading,
    /// Libraries listed in the manifest.
    #[display("SYSTEM READY: {_0}")]
    Ready(usize),
    /// Sound couldn't be enabled; everything else still works.
    #[display("ERROR AUDIO")]
    AudioError,
    /// The manifest couldn't be loaded, so there's nothing to show.
    #[display("ERROR LIBRARIES: {_0}")]
    ManifestError(String),
}

/// Toggle button caption, e.g. `SFX: ON`.
pub fn toggle_label(label: &str, on: bool) -> String {
    format!("{label}: {}", if on { "ON" } else { "OFF" })
}
