//! Hosted checkout creation and the payment processor webhook.
//!
//! The webhook is called by the processor, not by a browser, so it carries no
//! session. Its authenticity comes from the `Stripe-Signature` header, checked
//! against the raw request body.

use actix_web::{HttpRequest, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid, require};

/// Header the processor signs webhook deliveries with.
pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequestBody {
    pub booking_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CheckoutResponse {
    /// Hosted checkout page to redirect the client to.
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct WebhookAck {
    pub received: bool,
}

/// Start a hosted checkout for one of the caller's bookings.
#[utoipa::path(
    post,
    path = "/api/v1/payments/create-checkout",
    request_body = CheckoutRequestBody,
    responses(
        (status = 200, description = "Checkout session created", body = CheckoutResponse),
        (status = 400, description = "Missing booking id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the booking's client", body = Error),
        (status = 404, description = "Booking not found", body = Error),
        (status = 503, description = "Payment processor unavailable", body = Error)
    ),
    tags = ["payments"],
    operation_id = "createCheckout"
)]
#[post("/payments/create-checkout")]
pub async fn create_checkout(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CheckoutRequestBody>,
) -> ApiResult<web::Json<CheckoutResponse>> {
    let actor = session.require_actor()?;
    let raw = require(payload.into_inner().booking_id, FieldName::new("bookingId"))?;
    let booking_id = parse_uuid(&raw, FieldName::new("bookingId"))?;
    let checkout = state.payments.create_checkout(&actor, &booking_id).await?;
    Ok(web::Json(CheckoutResponse { url: checkout.url }))
}

/// Receive a signed event from the payment processor.
#[utoipa::path(
    post,
    path = "/api/v1/payments/webhook",
    request_body(content = String, content_type = "application/json"),
    params(("Stripe-Signature" = String, Header, description = "Processor signature")),
    responses(
        (status = 200, description = "Event accepted", body = WebhookAck),
        (status = 400, description = "Missing or invalid signature", body = Error),
        (status = 404, description = "Booking not found", body = Error),
        (status = 409, description = "Booking already paid by another session", body = Error)
    ),
    tags = ["payments"],
    operation_id = "paymentWebhook",
    security([])
)]
#[post("/payments/webhook")]
pub async fn webhook(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<web::Json<WebhookAck>> {
    let signature = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::invalid_request("No signature"))?;
    state.payments.handle_webhook(&body, signature).await?;
    Ok(web::Json(WebhookAck { received: true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::WebhookOutcome;
    use crate::domain::{Actor, CheckoutSession, Role, UserId};
    use crate::inbound::http::test_utils::{
        MockPorts, session_cookie_for, test_session_middleware, test_sign_in_route,
    };
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};
    use uuid::Uuid;

    async fn call(
        ports: MockPorts,
        actor: Option<Actor>,
        request: test::TestRequest,
    ) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(
            App::new()
                .app_data(ports.into_state())
                .wrap(test_session_middleware())
                .configure(test_sign_in_route)
                .service(
                    web::scope("/api/v1")
                        .service(create_checkout)
                        .service(webhook),
                ),
        )
        .await;
        let request = match actor {
            Some(actor) => request.cookie(session_cookie_for(&app, &actor).await),
            None => request,
        };
        test::call_service(&app, request.to_request()).await
    }

    #[rstest]
    #[actix_web::test]
    async fn checkout_returns_the_hosted_url() {
        let booking_id = Uuid::new_v4();
        let mut ports = MockPorts::default();
        ports
            .payments
            .expect_create_checkout()
            .withf(move |_, id| *id == booking_id)
            .return_once(|_, _| {
                Ok(CheckoutSession {
                    id: "cs_test_1".to_owned(),
                    url: "https://checkout.stripe.com/c/pay/cs_test_1".to_owned(),
                })
            });

        let response = call(
            ports,
            Some(Actor::new(UserId::random(), Role::Client)),
            test::TestRequest::post()
                .uri("/api/v1/payments/create-checkout")
                .set_json(json!({"bookingId": booking_id})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["url"], json!("https://checkout.stripe.com/c/pay/cs_test_1"));
    }

    #[rstest]
    #[actix_web::test]
    async fn checkout_requires_a_booking_id() {
        let response = call(
            MockPorts::default(),
            Some(Actor::new(UserId::random(), Role::Client)),
            test::TestRequest::post()
                .uri("/api/v1/payments/create-checkout")
                .set_json(json!({})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn webhook_without_signature_is_rejected() {
        let response = call(
            MockPorts::default(),
            None,
            test::TestRequest::post()
                .uri("/api/v1/payments/webhook")
                .set_payload("{}"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["message"], json!("No signature"));
    }

    #[rstest]
    #[case(WebhookOutcome::PaymentRecorded { booking_id: Uuid::nil() })]
    #[case(WebhookOutcome::AlreadyRecorded { booking_id: Uuid::nil() })]
    #[case(WebhookOutcome::Ignored { kind: "charge.refunded".to_owned() })]
    #[actix_web::test]
    async fn webhook_acknowledges_verified_events(#[case] outcome: WebhookOutcome) {
        let mut ports = MockPorts::default();
        ports
            .payments
            .expect_handle_webhook()
            .withf(|payload, signature| payload == b"{\"id\":\"evt_1\"}" && signature == "t=1,v1=abc")
            .return_once(move |_, _| Ok(outcome));

        let response = call(
            ports,
            None,
            test::TestRequest::post()
                .uri("/api/v1/payments/webhook")
                .insert_header((SIGNATURE_HEADER, "t=1,v1=abc"))
                .set_payload("{\"id\":\"evt_1\"}"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body, json!({"received": true}));
    }

    #[rstest]
    #[actix_web::test]
    async fn webhook_surfaces_verification_failures() {
        let mut ports = MockPorts::default();
        ports.payments.expect_handle_webhook().return_once(|_, _| {
            Err(Error::invalid_request(
                "Webhook signature verification failed: signature mismatch",
            ))
        });

        let response = call(
            ports,
            None,
            test::TestRequest::post()
                .uri("/api/v1/payments/webhook")
                .insert_header((SIGNATURE_HEADER, "t=1,v1=bad"))
                .set_payload("{}"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn webhook_for_an_already_paid_booking_is_not_acknowledged() {
        let mut ports = MockPorts::default();
        ports.payments.expect_handle_webhook().return_once(|_, _| {
            Err(Error::conflict(format!(
                "booking {} already has a payment",
                Uuid::nil()
            )))
        });

        let response = call(
            ports,
            None,
            test::TestRequest::post()
                .uri("/api/v1/payments/webhook")
                .insert_header((SIGNATURE_HEADER, "t=1,v1=abc"))
                .set_payload("{}"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
