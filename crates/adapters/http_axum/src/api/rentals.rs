//! JSON handlers for rentals.
//!
//! Opening a rental goes through the car first: the car is looked up by the
//! path id (404 when absent) and then handed to the rental service.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use serde::Deserialize;

use carrental_app::ports::{CarRepository, RentalRepository};
use carrental_domain::id::{CarId, RentalId};
use carrental_domain::rental::Rental;

use super::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for opening a rental.
#[derive(Deserialize)]
pub struct CreateRentalRequest {
    pub customer_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Rental>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from endpoints returning a single rental.
pub enum RentalResponse {
    Ok(Json<Rental>),
    Created(Json<Rental>),
}

impl IntoResponse for RentalResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `POST /api/cars/:id/rentals`
pub async fn create_for_car<CR, RR>(
    State(state): State<AppState<CR, RR>>,
    Path(id): Path<String>,
    payload: Result<Json<CreateRentalRequest>, JsonRejection>,
) -> Result<RentalResponse, ApiError>
where
    CR: CarRepository + Send + Sync + 'static,
    RR: RentalRepository + Send + Sync + 'static,
{
    let car_id: CarId = parse_id("car", &id)?;
    let Json(req) = payload?;
    let car = state.car_service.get_car(car_id).await?;
    let rental = state
        .rental_service
        .create_rental_for_car(&car, req.customer_name, req.start_date, req.end_date)
        .await?;
    Ok(RentalResponse::Created(Json(rental)))
}

/// `GET /api/cars/:id/rentals`
pub async fn list_for_car<CR, RR>(
    State(state): State<AppState<CR, RR>>,
    Path(id): Path<String>,
) -> Result<ListResponse, ApiError>
where
    CR: CarRepository + Send + Sync + 'static,
    RR: RentalRepository + Send + Sync + 'static,
{
    let car_id: CarId = parse_id("car", &id)?;
    let car = state.car_service.get_car(car_id).await?;
    let rentals = state.rental_service.list_rentals_for_car(car.id).await?;
    Ok(ListResponse::Ok(Json(rentals)))
}

/// `GET /api/rentals/:id`
pub async fn get<CR, RR>(
    State(state): State<AppState<CR, RR>>,
    Path(id): Path<String>,
) -> Result<RentalResponse, ApiError>
where
    CR: CarRepository + Send + Sync + 'static,
    RR: RentalRepository + Send + Sync + 'static,
{
    let rental_id: RentalId = parse_id("rental", &id)?;
    let rental = state.rental_service.get_rental(rental_id).await?;
    Ok(RentalResponse::Ok(Json(rental)))
}

/// `POST /api/rentals/:id/complete`
pub async fn complete<CR, RR>(
    State(state): State<AppState<CR, RR>>,
    Path(id): Path<String>,
) -> Result<RentalResponse, ApiError>
where
    CR: CarRepository + Send + Sync + 'static,
    RR: RentalRepository + Send + Sync + 'static,
{
    let rental_id: RentalId = parse_id("rental", &id)?;
    let rental = state.rental_service.complete_rental(rental_id).await?;
    Ok(RentalResponse::Ok(Json(rental)))
}
