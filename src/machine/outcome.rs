//! Result of a single transition attempt.

/// What happened to a transition attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Nothing to do: no current state, unknown action, or no target
    Ignored,

    /// The target became current
    Changed { from: Option<String>, to: String },

    /// A listener vetoed while the current state was exiting
    CanceledOnExit { from: Option<String>, to: String },

    /// A listener vetoed while the target was entering. The exiting
    /// notification has already been sent; the current state is unchanged.
    CanceledOnEnter { from: Option<String>, to: String },
}

impl TransitionOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }

    pub fn is_canceled(&self) -> bool {
        matches!(
            self,
            Self::CanceledOnExit { .. } | Self::CanceledOnEnter { .. }
        )
    }

    /// The state the attempt was heading for.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Ignored => None,
            Self::Changed { to, .. }
            | Self::CanceledOnExit { to, .. }
            | Self::CanceledOnEnter { to, .. } => Some(to.as_str()),
        }
    }
}
