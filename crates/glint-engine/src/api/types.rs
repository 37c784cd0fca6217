/// Unique identifier for a mounted marker instance.
///
/// Handles are issued at mount time and are distinct from the catalog's
/// string ids so that the per-frame paths never hash strings. The same
/// catalog id mounted twice (e.g. after route navigation) gets a new handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u32);

/// How an activation reached the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationSource {
    /// Pointer click.
    Pointer,
    /// Touch tap.
    Touch,
    /// `Enter`/`Space` while the marker has keyboard focus.
    Key,
}

/// An event emitted by the engine for the UI layer to react to
/// (toasts, sounds, the completion notice). Drained once per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A marker was discovered for the first time.
    Discovered { handle: Option<MarkerHandle>, id: String, bonus: bool },
    /// Running progress after a discovery: `found` out of `total`.
    Progress { found: u32, total: u32 },
    /// Every marker has been found; the completion notice may be shown.
    CompletionReady,
    /// Activation was refused because the visitor is signed out and the
    /// engine is configured with `SignInPolicy::RequireSignIn`.
    SignInPrompt { handle: MarkerHandle },
}
