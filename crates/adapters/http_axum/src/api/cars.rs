//! JSON handlers for cars.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use carrental_app::ports::{CarRepository, RentalRepository};
use carrental_domain::car::Car;
use carrental_domain::id::CarId;

use super::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a car.
#[derive(Deserialize)]
pub struct CreateCarRequest {
    pub model: String,
    pub year: i32,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Car>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Car>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Car>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/cars`
pub async fn list<CR, RR>(State(state): State<AppState<CR, RR>>) -> Result<ListResponse, ApiError>
where
    CR: CarRepository + Send + Sync + 'static,
    RR: RentalRepository + Send + Sync + 'static,
{
    let cars = state.car_service.list_cars().await?;
    Ok(ListResponse::Ok(Json(cars)))
}

/// `GET /api/cars/:id`
pub async fn get<CR, RR>(
    State(state): State<AppState<CR, RR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    CR: CarRepository + Send + Sync + 'static,
    RR: RentalRepository + Send + Sync + 'static,
{
    let car_id: CarId = parse_id("car", &id)?;
    let car = state.car_service.get_car(car_id).await?;
    Ok(GetResponse::Ok(Json(car)))
}

/// `POST /api/cars`
pub async fn create<CR, RR>(
    State(state): State<AppState<CR, RR>>,
    payload: Result<Json<CreateCarRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    CR: CarRepository + Send + Sync + 'static,
    RR: RentalRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let car = state.car_service.create_car(req.model, req.year).await?;
    Ok(CreateResponse::Created(Json(car)))
}
