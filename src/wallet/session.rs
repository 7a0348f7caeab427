use solana_sdk::pubkey::Pubkey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Connected { account: Pubkey },
}

/// Callbacks a connector reports. They are the only way the session moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    ConnectRequested,
    Connected(Pubkey),
    ConnectFailed(String),
    Disconnected,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot apply {event:?} while {state:?}")]
    InvalidTransition {
        state: SessionState,
        event: SessionEvent,
    },
    #[error("wallet is not connected")]
    NotConnected,
    #[error("connected wallet is {connected}, not {requested}")]
    AccountMismatch { connected: Pubkey, requested: Pubkey },
    #[error("wallet connection failed: {0}")]
    ConnectFailed(String),
    #[error("request rejected in wallet")]
    Rejected,
}

#[derive(Debug)]
pub struct WalletSession {
    state: SessionState,
}

impl Default for WalletSession {
    fn default() -> Self {
        Self {
            state: SessionState::Disconnected,
        }
    }
}

impl WalletSession {
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn account(&self) -> Option<Pubkey> {
        match self.state {
            SessionState::Connected { account } => Some(account),
            _ => None,
        }
    }

    pub fn apply(&mut self, event: SessionEvent) -> Result<&SessionState, SessionError> {
        let next = match (&self.state, &event) {
            (SessionState::Disconnected, SessionEvent::ConnectRequested) => {
                SessionState::Connecting
            }
            // A wallet may switch accounts without dropping the session.
            (
                SessionState::Connecting | SessionState::Connected { .. },
                SessionEvent::Connected(account),
            ) => SessionState::Connected { account: *account },
            (SessionState::Connecting, SessionEvent::ConnectFailed(reason)) => {
                tracing::warn!("Wallet connection failed: {reason}");
                SessionState::Disconnected
            }
            (
                SessionState::Connecting | SessionState::Connected { .. },
                SessionEvent::Disconnected,
            ) => SessionState::Disconnected,
            _ => {
                tracing::warn!("Ignoring wallet event {event:?} while {:?}", self.state);
                return Err(SessionError::InvalidTransition {
                    state: self.state.clone(),
                    event: event.clone(),
                });
            }
        };

        tracing::debug!("Wallet session: {:?} -> {next:?}", self.state);
        self.state = next;

        Ok(&self.state)
    }

    /// The signer for `requested`, provided it is the connected account.
    pub fn signer_for(&self, requested: &Pubkey) -> Result<Pubkey, SessionError> {
        match self.state {
            SessionState::Connected { account } if account == *requested => Ok(account),
            SessionState::Connected { account } => Err(SessionError::AccountMismatch {
                connected: account,
                requested: *requested,
            }),
            _ => Err(SessionError::NotConnected),
        }
    }
}
