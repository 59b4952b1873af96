//! HTTP adapter over the `Predictor`.
//!
//! * `POST /predict` with `{"text": "..."}`
//! * `GET /predict_get?text=...`
//!
//! Both answer `{"input", "prediction", "confidence"}` with the confidence
//! rounded to four digits. CORS is wide open, which only suits development.

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use log::info;
use serde::{Deserialize, Serialize};

use crate::classifier::{Precision, Predictor};

/// Returned by `GET /predict_get` when no text was given.
pub const MISSING_TEXT_MESSAGE: &str = "Provide the 'text' parameter in the query string.";

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct PredictQuery {
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Registers the prediction routes. The predictor must be provided as
/// `web::Data<Predictor>` app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().content_type_required(false))
        .route("/predict", web::post().to(predict))
        .route("/predict_get", web::get().to(predict_get));
}

/// Allows any origin, method and header.
pub fn cors() -> Cors {
    Cors::permissive()
}

async fn predict(predictor: web::Data<Predictor>, body: web::Json<PredictRequest>) -> HttpResponse {
    let prediction = predictor.predict(&body.text, Precision::Http);
    HttpResponse::Ok().json(prediction)
}

async fn predict_get(predictor: web::Data<Predictor>, query: web::Query<PredictQuery>) -> HttpResponse {
    match query.text.as_deref().filter(|text| !text.is_empty()) {
        Some(text) => HttpResponse::Ok().json(predictor.predict(text, Precision::Http)),
        None => HttpResponse::Ok().json(ErrorResponse {
            error: MISSING_TEXT_MESSAGE.to_string(),
        }),
    }
}

/// Serves the API until the process is interrupted.
pub async fn run(predictor: Predictor, bind_address: &str) -> std::io::Result<()> {
    let predictor = web::Data::new(predictor);
    info!("Server running at http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(cors())
            .wrap(Logger::default())
            .app_data(predictor.clone())
            .configure(configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
