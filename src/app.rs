//! HTTP wiring shared by the binary and the contract tests

use std::sync::Arc;

use actix_web::web;
use chrono::FixedOffset;

use crate::middleware::{json_error_handler, query_error_handler};
use crate::modules::employees::EmployeeService;
use crate::modules::enquiries::EnquiryService;
use crate::modules::follow_ups::FollowUpService;
use crate::modules::members::MemberService;
use crate::modules::memberships::MembershipService;
use crate::modules::payments::PaymentService;
use crate::modules::personal_training::PersonalTrainingService;
use crate::modules::reports::{ListingService, ReportService};
use crate::modules::{
    employees, enquiries, follow_ups, health, members, memberships, payments, personal_training,
    reports,
};
use crate::store::EntityStore;

/// Every service, built once over one store handle
#[derive(Clone)]
pub struct AppServices {
    store: Arc<EntityStore>,
    members: Arc<MemberService>,
    memberships: Arc<MembershipService>,
    payments: Arc<PaymentService>,
    employees: Arc<EmployeeService>,
    enquiries: Arc<EnquiryService>,
    follow_ups: Arc<FollowUpService>,
    personal_training: Arc<PersonalTrainingService>,
    listing: Arc<ListingService>,
    reports: Arc<ReportService>,
}

impl AppServices {
    pub fn new(store: EntityStore, offset: FixedOffset) -> Self {
        Self {
            members: Arc::new(MemberService::new(store.clone())),
            memberships: Arc::new(MembershipService::new(store.clone())),
            payments: Arc::new(PaymentService::new(store.clone())),
            employees: Arc::new(EmployeeService::new(store.clone())),
            enquiries: Arc::new(EnquiryService::new(store.clone())),
            follow_ups: Arc::new(FollowUpService::new(store.clone())),
            personal_training: Arc::new(PersonalTrainingService::new(store.clone())),
            listing: Arc::new(ListingService::new(store.clone(), offset)),
            reports: Arc::new(ReportService::new(store.clone(), offset)),
            store: Arc::new(store),
        }
    }

    /// Register app data, `/api` routes and the probes
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.store.clone()))
            .app_data(web::Data::new(self.members.clone()))
            .app_data(web::Data::new(self.memberships.clone()))
            .app_data(web::Data::new(self.payments.clone()))
            .app_data(web::Data::new(self.employees.clone()))
            .app_data(web::Data::new(self.enquiries.clone()))
            .app_data(web::Data::new(self.follow_ups.clone()))
            .app_data(web::Data::new(self.personal_training.clone()))
            .app_data(web::Data::new(self.listing.clone()))
            .app_data(web::Data::new(self.reports.clone()))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .configure(health::configure)
            .service(
                web::scope("/api")
                    .configure(members::controllers::configure)
                    .configure(memberships::controllers::configure)
                    .configure(payments::controllers::configure)
                    .configure(employees::controllers::configure)
                    .configure(enquiries::controllers::configure)
                    .configure(follow_ups::controllers::configure)
                    .configure(personal_training::controllers::configure)
                    .configure(reports::controllers::configure),
            );
    }
}
