//! Framework-agnostic registration form handler.

use portal_application::{AccessGate, RegistrationError, RegistrationForm};
use portal_core::{IdentityProvider, PortalRequest, PortalResponseBuilder, RegistrationEndpoint};

use super::{HandlerError, PortalContext, new_gate_id, render_gate_page};

/// Handle a registration form submission.
///
/// # Arguments
///
/// * `context` - Shared handler context
/// * `request` - The HTTP request (implements PortalRequest trait)
/// * `form` - Form fields, already decoded by the framework
/// * `builder` - Response builder (framework-specific but implements our trait)
///
/// # Returns
///
/// The re-rendered gate. While a submission from the same gate is in flight,
/// a second one is refused with 409 and never reaches the endpoint.
#[tracing::instrument(name = "Registration submit", skip_all)]
pub async fn handle_register<P, R, Req, B>(
    context: &PortalContext<P, R>,
    request: &Req,
    form: RegistrationForm,
    builder: B,
) -> Result<B::Response, HandlerError>
where
    P: IdentityProvider,
    R: RegistrationEndpoint,
    Req: PortalRequest,
    B: PortalResponseBuilder,
{
    let mut gate = AccessGate::from_form(&form);

    let (key, builder) = match context.cookies.gate_id(request) {
        Some(id) => (id.to_owned(), builder),
        None => {
            let id = new_gate_id();
            let builder = builder.cookie(&context.cookies.set_gate_id(&id));
            (id, builder)
        }
    };

    let Some(_guard) = context.in_flight.try_begin(&key) else {
        tracing::info!("registration refused, gate already has a request in flight");
        gate.refuse_busy();
        return render_gate_page(context, &gate, 409, builder);
    };

    gate.start_loading();
    let outcome = context.registration.execute(&form).await;
    gate.finish_registration(&outcome);

    let status = match &outcome {
        Ok(_) => 200,
        Err(RegistrationError::InvalidFields(_) | RegistrationError::MissingCaptcha) => 422,
        Err(RegistrationError::RegistrationEndpointError(e)) => {
            tracing::warn!(error = %e, "registration endpoint call failed");
            502
        }
    };

    render_gate_page(context, &gate, status, builder)
}
