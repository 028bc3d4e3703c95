//! In-memory implementation of AppointmentReader.
//!
//! Joins the in-memory store, directory, and review store the way the
//! Postgres reader joins its tables.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::appointment::AppointmentStatus;
use crate::domain::foundation::DomainError;
use crate::ports::{AppointmentReader, AppointmentView, ListScope, ReviewStore, UserDirectory};

use super::{InMemoryAppointmentStore, InMemoryReviewStore, InMemoryUserDirectory};

/// In-memory implementation of the AppointmentReader port.
pub struct InMemoryAppointmentReader {
    store: Arc<InMemoryAppointmentStore>,
    directory: Arc<InMemoryUserDirectory>,
    reviews: Arc<InMemoryReviewStore>,
}

impl InMemoryAppointmentReader {
    pub fn new(
        store: Arc<InMemoryAppointmentStore>,
        directory: Arc<InMemoryUserDirectory>,
        reviews: Arc<InMemoryReviewStore>,
    ) -> Self {
        Self {
            store,
            directory,
            reviews,
        }
    }
}

#[async_trait]
impl AppointmentReader for InMemoryAppointmentReader {
    async fn list(
        &self,
        scope: &ListScope,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<AppointmentView>, DomainError> {
        let mut appointments: Vec<_> = self
            .store
            .appointments()
            .into_iter()
            .filter(|a| match scope {
                ListScope::Client(id) => &a.client_id == id,
                ListScope::Provider(id) => &a.provider_id == id,
                ListScope::All => true,
            })
            .filter(|a| status.map(|s| a.status == s).unwrap_or(true))
            .collect();
        appointments.sort_by(|a, b| b.starts_at.cmp(&a.starts_at));

        let mut views = Vec::with_capacity(appointments.len());
        for appointment in appointments {
            let client_name = self
                .directory
                .find_user(&appointment.client_id)
                .await?
                .map(|u| u.name)
                .unwrap_or_else(|| appointment.client_id.to_string());
            let provider_name = self
                .directory
                .find_user(&appointment.provider_id)
                .await?
                .map(|u| u.name)
                .unwrap_or_else(|| appointment.provider_id.to_string());
            let has_review = self
                .reviews
                .find_by_appointment(&appointment.id)
                .await?
                .is_some();

            views.push(AppointmentView {
                id: appointment.id,
                starts_at: appointment.starts_at,
                duration_min: appointment.duration_min,
                modality: appointment.modality,
                status: appointment.status,
                subject: appointment.subject,
                meeting_link: appointment.meeting_link,
                provider_notes: appointment.provider_notes,
                client_id: appointment.client_id,
                client_name,
                provider_id: appointment.provider_id,
                provider_name,
                has_review,
            });
        }
        Ok(views)
    }
}
