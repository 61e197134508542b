use async_trait::async_trait;
use contracts::domain::a002_offer::aggregate::{Offer, OfferDto, OfferId};
use web_sys::File;

use super::store::OfferSource;
use crate::shared::error::AppError;
use crate::shared::http::ApiRequest;

pub async fn list() -> Result<Vec<Offer>, AppError> {
    ApiRequest::get("/api/offers")
        .send_json::<Vec<Offer>>()
        .await
        .map_err(|e| e.localize(|_| "Error al cargar ofertas"))
}

pub async fn get(id: OfferId) -> Result<Offer, AppError> {
    ApiRequest::get(format!("/api/offers/{}", id))
        .send_json::<Offer>()
        .await
        .map_err(|e| {
            e.localize(|status| match status {
                404 => "Oferta no encontrada",
                _ => "Error al cargar la oferta",
            })
        })
}

pub async fn create(token: &str, dto: &OfferDto, image: Option<&File>) -> Result<(), AppError> {
    ApiRequest::post("/api/offers")
        .bearer(token)
        .multipart(dto, image)?
        .send_empty()
        .await
        .map_err(|e| e.localize(|_| "Error al crear la oferta"))
}

pub async fn update(
    token: &str,
    id: OfferId,
    dto: &OfferDto,
    image: Option<&File>,
) -> Result<(), AppError> {
    ApiRequest::put(format!("/api/offers/{}", id))
        .bearer(token)
        .multipart(dto, image)?
        .send_empty()
        .await
        .map_err(|e| e.localize(|_| "Error al actualizar la oferta"))
}

pub async fn delete(token: &str, id: OfferId) -> Result<(), AppError> {
    ApiRequest::delete(format!("/api/offers/{}", id))
        .bearer(token)
        .send_empty()
        .await
        .map_err(|e| e.localize(|_| "Error al eliminar la oferta"))
}

/// Emails the given offers to every subscribed user
pub async fn notify(token: &str, ids: &[OfferId]) -> Result<(), AppError> {
    ApiRequest::post("/api/offers/notify")
        .bearer(token)
        .json(&ids)?
        .send_empty()
        .await
        .map_err(|e| e.localize(|_| "Error al enviar las notificaciones"))
}

/// Backend-backed [`OfferSource`]
pub struct OffersApi;

#[async_trait(?Send)]
impl OfferSource for OffersApi {
    type Upload = File;

    async fn list(&self) -> Result<Vec<Offer>, AppError> {
        list().await
    }

    async fn create(&self, token: &str, dto: &OfferDto, image: Option<&File>) -> Result<(), AppError> {
        create(token, dto, image).await
    }

    async fn update(
        &self,
        token: &str,
        id: OfferId,
        dto: &OfferDto,
        image: Option<&File>,
    ) -> Result<(), AppError> {
        update(token, id, dto, image).await
    }

    async fn delete(&self, token: &str, id: OfferId) -> Result<(), AppError> {
        delete(token, id).await
    }

    async fn notify(&self, token: &str, ids: &[OfferId]) -> Result<(), AppError> {
        notify(token, ids).await
    }
}
