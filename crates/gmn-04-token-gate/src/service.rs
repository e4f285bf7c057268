//! # Token Gate Service
//!
//! Runs the sign-in flow against the connected wallet and keeps the
//! authorization decision in step with the session.

use crate::domain::challenge::{ChallengeIssuer, ChallengePolicy};
use crate::domain::errors::{InvalidTransition, SignInError};
use crate::domain::notification::Notification;
use crate::domain::outcome::GateOutcome;
use crate::domain::state::{AuthMachine, AuthState};
use crate::ports::inbound::ContentGate;
use crate::ports::outbound::NotificationSink;
use gmn_01_signature_verification::SignatureVerifier;
use gmn_02_wallet_session::{SessionManager, SessionSnapshot, WalletError};
use gmn_03_chain_reader::TokenBalanceReader;
use parking_lot::Mutex;
use shared_bus::Subscription;
use shared_types::{Address, PersonalSignature};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Gate configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// ERC-20 whose holders are admitted.
    pub token: Address,
    pub challenge: ChallengePolicy,
}

impl GateConfig {
    pub fn new(token: Address) -> Self {
        Self {
            token,
            challenge: ChallengePolicy::default(),
        }
    }

    pub fn with_challenge(mut self, challenge: ChallengePolicy) -> Self {
        self.challenge = challenge;
        self
    }
}

/// Clears the busy state on every exit path. Dropping an unsettled guard
/// rolls the machine back to its state before the attempt.
struct BusyGuard<'a> {
    machine: &'a Mutex<AuthMachine>,
    settled: bool,
}

impl<'a> BusyGuard<'a> {
    fn begin(machine: &'a Mutex<AuthMachine>) -> Result<Self, InvalidTransition> {
        machine.lock().transition(AuthState::Signing)?;
        Ok(Self {
            machine,
            settled: false,
        })
    }

    fn advance(&self, to: AuthState) -> Result<(), InvalidTransition> {
        self.machine.lock().transition(to).map(|_| ())
    }

    fn settle(mut self, to: AuthState) -> Result<(), InvalidTransition> {
        self.machine.lock().transition(to)?;
        self.settled = true;
        Ok(())
    }

    /// Record a denial. A standing grant is kept: dropping the unsettled
    /// guard rolls back to it.
    fn deny(self, generation: u64) -> Result<(), InvalidTransition> {
        let target = self.machine.lock().rollback_target();
        if target.is_authorized() {
            debug!("Denial keeps the earlier grant");
            return Ok(());
        }
        self.settle(AuthState::Denied { generation })
    }

    /// End the attempt in `Idle` regardless of what came before.
    fn abort(mut self) {
        if self.machine.lock().transition(AuthState::Idle).is_ok() {
            self.settled = true;
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            let restored = self.machine.lock().rollback();
            debug!(state = restored.name(), "Sign-in ended without a decision");
        }
    }
}

/// Sign-in with wallet, gated on token balance.
pub struct TokenGate {
    session: Arc<SessionManager>,
    verifier: Arc<dyn SignatureVerifier>,
    balances: Arc<dyn TokenBalanceReader>,
    notifier: Arc<dyn NotificationSink>,
    challenges: ChallengeIssuer,
    token: Address,
    machine: Mutex<AuthMachine>,
}

impl TokenGate {
    pub fn new(
        session: Arc<SessionManager>,
        verifier: Arc<dyn SignatureVerifier>,
        balances: Arc<dyn TokenBalanceReader>,
        notifier: Arc<dyn NotificationSink>,
        config: GateConfig,
    ) -> Self {
        Self {
            session,
            verifier,
            balances,
            notifier,
            challenges: ChallengeIssuer::new(config.challenge),
            token: config.token,
            machine: Mutex::new(AuthMachine::new()),
        }
    }

    pub fn token(&self) -> Address {
        self.token
    }

    pub fn challenges(&self) -> &ChallengeIssuer {
        &self.challenges
    }

    pub fn state(&self) -> AuthState {
        self.machine.lock().state()
    }

    pub fn is_busy(&self) -> bool {
        self.state().is_busy()
    }

    /// Authorized for the session that is connected right now.
    pub fn is_authorized(&self) -> bool {
        match self.state() {
            AuthState::Authorized { address, generation } => self
                .session
                .current()
                .is_some_and(|(_, s)| s.generation == generation && s.address == address),
            _ => false,
        }
    }

    /// Number of completed busy periods, successful or not.
    pub fn busy_exits(&self) -> u64 {
        self.machine.lock().busy_exits()
    }

    /// Decide whether `signature` over `message` proves that `address`
    /// holds the gating token. Touches no gate state.
    pub async fn evaluate(
        &self,
        message: &str,
        address: Address,
        signature: &PersonalSignature,
    ) -> GateOutcome {
        let verification = self.verifier.verify_signer(message, signature, address);
        if !verification.valid {
            debug!(
                expected = %address,
                recovered = ?verification.recovered_address,
                error = ?verification.error,
                "Signature does not match claimed address"
            );
            return GateOutcome::DeniedMismatch {
                expected: address,
                recovered: verification.recovered_address,
            };
        }

        match self.balances.balance_of(self.token, address).await {
            Ok(balance) if balance.is_zero() => GateOutcome::DeniedNoBalance { address },
            Ok(balance) => {
                debug!(address = %address, %balance, "Token holder verified");
                GateOutcome::Authorized { address }
            }
            Err(e) => {
                warn!(address = %address, token = %self.token, error = %e, "Balance query failed");
                GateOutcome::ErrorTransient {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// `true` only when the signature is by `address` and `address` holds
    /// a positive balance. Query failures count as `false`.
    pub async fn validate_user(
        &self,
        message: &str,
        address: Address,
        signature: &PersonalSignature,
    ) -> bool {
        self.evaluate(message, address, signature)
            .await
            .is_authorized()
    }

    /// Ask the connected wallet to sign a challenge and authorize it when
    /// it proves token ownership. Reports the result through the
    /// notification sink.
    ///
    /// # Errors
    /// See [`SignInError`]. A standing grant survives every failure;
    /// `AddressMismatch` and `NotAHolder` otherwise settle in `Denied`.
    pub async fn sign_in(&self) -> Result<Address, SignInError> {
        let result = self.run_sign_in().await;
        match &result {
            Ok(address) => {
                info!(address = %address, "Sign-in authorized");
                self.notifier.notify(Notification::success(
                    "Welcome",
                    format!("{} holds the GMN token.", address.short()),
                ));
            }
            Err(SignInError::AlreadyInProgress) => {
                self.notifier.notify(Notification::info(
                    "Sign-in pending",
                    "Finish the request in your wallet.",
                ));
            }
            Err(e) => {
                info!(reason = e.label(), error = %e, "Sign-in not authorized");
                self.notifier
                    .notify(Notification::error(failure_title(e), e.to_string()));
            }
        }
        result
    }

    async fn run_sign_in(&self) -> Result<Address, SignInError> {
        let (signer, snapshot) = self
            .session
            .current()
            .ok_or(SignInError::NoWalletConnected)?;

        let guard =
            BusyGuard::begin(&self.machine).map_err(|_| SignInError::AlreadyInProgress)?;

        let challenge = self.challenges.issue(snapshot.address, snapshot.chain_id);
        debug!(
            address = %snapshot.address,
            generation = snapshot.generation,
            signer = signer.kind(),
            "Requesting sign-in signature"
        );

        let signature = signer
            .sign_message(&challenge.message)
            .await
            .map_err(signing_error)?;

        if !self.still_current(&snapshot) {
            guard.abort();
            return Err(SignInError::IdentityChanged);
        }
        guard.advance(AuthState::Verifying)?;
        self.challenges.redeem(&challenge)?;

        let outcome = self
            .evaluate(&challenge.message, snapshot.address, &signature)
            .await;

        if !self.still_current(&snapshot) {
            guard.abort();
            return Err(SignInError::IdentityChanged);
        }

        match outcome {
            GateOutcome::Authorized { address } => {
                guard.settle(AuthState::Authorized {
                    address,
                    generation: snapshot.generation,
                })?;
                Ok(address)
            }
            GateOutcome::DeniedNoBalance { address } => {
                guard.deny(snapshot.generation)?;
                Err(SignInError::NotAHolder(address))
            }
            GateOutcome::DeniedMismatch { expected, .. } => {
                guard.deny(snapshot.generation)?;
                Err(SignInError::AddressMismatch(expected))
            }
            GateOutcome::ErrorTransient { reason } => Err(SignInError::BalanceQueryFailed(reason)),
        }
    }

    fn still_current(&self, snapshot: &SessionSnapshot) -> bool {
        snapshot.is_current(self.session.generation())
    }

    /// Clear any decision made before session `generation`.
    pub fn revoke(&self, generation: u64) -> bool {
        let (was, cleared) = {
            let mut machine = self.machine.lock();
            let was = machine.state();
            (was, machine.revoke(generation))
        };
        if cleared && was.is_authorized() {
            info!(generation, "Authorization revoked by session change");
            self.notifier.notify(Notification::info(
                "Signed out",
                "Your wallet changed. Sign in again to view gated content.",
            ));
        }
        cleared
    }

    /// Revoke on every session event until the bus closes.
    pub async fn watch_session(self: Arc<Self>, mut subscription: Subscription) {
        while let Some(event) = subscription.recv().await {
            debug!(kind = ?event.kind(), generation = event.generation(), "Session event");
            self.revoke(event.generation());
        }
        debug!("Session event stream closed");
    }

    pub fn spawn_session_watch(self: &Arc<Self>, subscription: Subscription) -> JoinHandle<()> {
        tokio::spawn(Arc::clone(self).watch_session(subscription))
    }
}

impl ContentGate for TokenGate {
    fn can_view(&self) -> bool {
        self.is_authorized()
    }
}

fn signing_error(err: WalletError) -> SignInError {
    if err.is_rejection() {
        SignInError::SignatureRejected(err.to_string())
    } else {
        SignInError::SigningFailed(err.to_string())
    }
}

fn failure_title(err: &SignInError) -> &'static str {
    match err {
        SignInError::NoWalletConnected => "Wallet not connected",
        SignInError::SignatureRejected(_) => "Signature rejected",
        SignInError::NotAHolder(_) => "No GMN tokens found",
        SignInError::AddressMismatch(_) => "Invalid signature",
        SignInError::BalanceQueryFailed(_) => "Network error",
        SignInError::IdentityChanged => "Wallet changed",
        _ => "Sign-in failed",
    }
}
