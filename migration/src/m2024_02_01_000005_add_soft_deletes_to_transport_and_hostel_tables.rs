//! Adds soft deletes to transport and hostel tables.

use sea_orm_migration::prelude::*;

use crate::common::{add_soft_deletes, drop_soft_deletes};

const TABLES: &[&str] = &[
    "transport_routes",
    "transport_stops",
    "transport_vehicles",
    "transport_drivers",
    "transport_assignments",
    "transport_subscriptions",
    "transport_trips",
    "transport_maintenance_records",
    "hostels",
    "hostel_rooms",
    "hostel_beds",
    "hostel_allocations",
    "hostel_visitors",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        add_soft_deletes(manager, TABLES).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_soft_deletes(manager, TABLES).await
    }
}
