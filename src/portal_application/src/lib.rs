pub mod in_flight;
pub mod one_shot;
pub mod screens;
pub mod use_cases;

pub use in_flight::{InFlightGuard, InFlightRegistry};
pub use one_shot::OneShot;
pub use screens::{
    access_gate::{AccessGate, Banner, BannerKind, GateMode, messages},
    dashboard::{
        DEFAULT_PANELS, DashboardActivation, DashboardPanel, DashboardScreen, DashboardState,
        Destination, Navigator,
    },
};
pub use use_cases::{
    federated_login::{FederatedLoginError, FederatedLoginUseCase},
    sign_out::{SignOutError, SignOutUseCase},
    submit_registration::{
        FieldErrors, RegistrationError, RegistrationForm, SubmitRegistrationUseCase,
    },
};
