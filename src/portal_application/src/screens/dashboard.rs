use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::Utc;
use portal_core::{
    IdentityProvider, IdentityProviderError, Session, SessionEvent, SessionObserver,
    SessionSubscription, SessionToken,
};

use crate::{
    one_shot::OneShot,
    use_cases::sign_out::{SignOutError, SignOutUseCase},
};

/// A static informational panel shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardPanel {
    pub title: &'static str,
    pub body: &'static str,
}

pub const DEFAULT_PANELS: &[DashboardPanel] = &[
    DashboardPanel {
        title: "Avisos",
        body: "Acompanhe aqui os comunicados da coordenação e da secretaria acadêmica.",
    },
    DashboardPanel {
        title: "Calendário acadêmico",
        body: "Datas de matrícula, provas e entrega de trabalhos do semestre letivo.",
    },
    DashboardPanel {
        title: "Secretaria",
        body: "Solicite declarações e históricos diretamente com a secretaria da unidade.",
    },
    DashboardPanel {
        title: "Biblioteca",
        body: "Consulte o acervo e os horários de funcionamento da biblioteca.",
    },
];

/// Dashboard lifecycle. `Redirecting` is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardState {
    Loading,
    Authenticated(Session),
    Redirecting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    AccessGate,
}

/// Receives the dashboard's navigation requests.
pub trait Navigator: Send + Sync {
    fn navigate(&self, destination: Destination);
}

impl<F> Navigator for F
where
    F: Fn(Destination) + Send + Sync,
{
    fn navigate(&self, destination: Destination) {
        self(destination)
    }
}

/// Entry point of the Session Dashboard.
///
/// The session context is passed in explicitly on every activation.
pub struct DashboardScreen<P>
where
    P: IdentityProvider,
{
    provider: P,
    one_shot: OneShot,
}

impl<P> DashboardScreen<P>
where
    P: IdentityProvider,
{
    pub fn new(provider: P, one_shot: OneShot) -> Self {
        Self { provider, one_shot }
    }

    /// Activate the dashboard for the given session token.
    ///
    /// Without a token, or when the provider reports no live session, the
    /// activation ends in `Redirecting` before anything is rendered. A
    /// provider failure is treated the same way: access needs an observed session.
    ///
    /// The observer is registered before the lookup, so a session loss
    /// published while the lookup is pending still redirects.
    #[tracing::instrument(name = "DashboardScreen::activate", skip_all)]
    pub async fn activate(
        &self,
        token: Option<&SessionToken>,
        navigator: Arc<dyn Navigator>,
    ) -> DashboardActivation {
        let mut activation = DashboardActivation::loading(navigator);

        let Some(token) = token else {
            activation.redirect();
            return activation;
        };

        let observer = Arc::new(DashboardObserver {
            state: activation.state.clone(),
            navigator: activation.navigator.clone(),
        });
        activation.subscription = Some(self.provider.subscribe(token, observer));

        let session = self.lookup(token).await;
        activation.settle(session);
        activation
    }

    /// Resolve the session once without observing later changes.
    ///
    /// Used by single page renders that never outlive the request.
    #[tracing::instrument(name = "DashboardScreen::activate_unobserved", skip_all)]
    pub async fn activate_unobserved(
        &self,
        token: Option<&SessionToken>,
        navigator: Arc<dyn Navigator>,
    ) -> DashboardActivation {
        let mut activation = DashboardActivation::loading(navigator);

        match token {
            Some(token) => {
                let session = self.lookup(token).await;
                activation.settle(session);
            }
            None => activation.redirect(),
        }
        activation
    }

    async fn lookup(&self, token: &SessionToken) -> Option<Session> {
        let session = self
            .one_shot
            .call(self.provider.current_session(token), || {
                IdentityProviderError::TimedOut
            })
            .await;

        match session {
            Ok(Some(session)) if !session.is_expired_at(Utc::now()) => Some(session),
            Ok(_) => {
                tracing::info!("no live session, redirecting to access gate");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "session lookup failed, redirecting to access gate");
                None
            }
        }
    }
}

/// One live dashboard activation. Dropping it releases the session subscription.
pub struct DashboardActivation {
    state: Arc<ArcSwap<DashboardState>>,
    navigator: Arc<dyn Navigator>,
    subscription: Option<SessionSubscription>,
}

impl DashboardActivation {
    fn loading(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            state: Arc::new(ArcSwap::from_pointee(DashboardState::Loading)),
            navigator,
            subscription: None,
        }
    }

    // Loading moves to Authenticated only if no loss arrived meanwhile.
    fn settle(&mut self, session: Option<Session>) {
        let Some(session) = session else {
            self.redirect();
            self.release();
            return;
        };

        let previous = self.state.rcu(|current| match current.as_ref() {
            DashboardState::Loading => Arc::new(DashboardState::Authenticated(session.clone())),
            _ => current.clone(),
        });

        if !matches!(previous.as_ref(), DashboardState::Loading) {
            self.release();
        }
    }

    pub fn state(&self) -> Arc<DashboardState> {
        self.state.load_full()
    }

    pub fn session(&self) -> Option<Session> {
        match self.state.load().as_ref() {
            DashboardState::Authenticated(session) => Some(session.clone()),
            _ => None,
        }
    }

    pub fn is_redirecting(&self) -> bool {
        matches!(self.state.load().as_ref(), DashboardState::Redirecting)
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Sign out the active session.
    ///
    /// On success the dashboard redirects; on failure the state is left untouched.
    pub async fn sign_out<P>(&self, use_case: &SignOutUseCase<P>) -> Result<(), SignOutError>
    where
        P: IdentityProvider,
    {
        let Some(session) = self.session() else {
            return Ok(());
        };

        use_case.execute(session.token()).await?;
        self.redirect();
        Ok(())
    }

    /// End the activation, releasing the subscription now.
    pub fn deactivate(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.release();
        }
    }

    fn redirect(&self) {
        transition_to_redirect(&self.state, self.navigator.as_ref());
    }
}

struct DashboardObserver {
    state: Arc<ArcSwap<DashboardState>>,
    navigator: Arc<dyn Navigator>,
}

impl SessionObserver for DashboardObserver {
    fn on_session_event(&self, event: &SessionEvent) {
        match event {
            event if event.is_session_loss() => {
                tracing::info!(?event, "session lost while dashboard active");
                transition_to_redirect(&self.state, self.navigator.as_ref());
            }
            SessionEvent::SignedIn(session) | SessionEvent::Refreshed(session) => {
                self.state.rcu(|current| match current.as_ref() {
                    DashboardState::Authenticated(_) => {
                        Arc::new(DashboardState::Authenticated(session.clone()))
                    }
                    _ => current.clone(),
                });
            }
            _ => {}
        }
    }
}

// Navigates at most once per activation.
fn transition_to_redirect(state: &ArcSwap<DashboardState>, navigator: &dyn Navigator) {
    let previous = state.swap(Arc::new(DashboardState::Redirecting));
    if !matches!(previous.as_ref(), DashboardState::Redirecting) {
        navigator.navigate(Destination::AccessGate);
    }
}
