//! Migration to create the transport operation tables.
//!
//! An assignment binds a vehicle and driver to a route for one academic year.
//! Students subscribe to a route and optionally a stop on it; trips and
//! maintenance records hang off the vehicle.

use sea_orm_migration::prelude::*;

use crate::common::{
    cascade, created_at, drop_tables, index, set_null, unique_index, updated_at, uuid_pk,
    uuid_ref, uuid_ref_null,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TransportAssignments::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, TransportAssignments::Id))
                    .col(uuid_ref(TransportAssignments::TransportRouteId))
                    .col(uuid_ref(TransportAssignments::TransportVehicleId))
                    .col(uuid_ref_null(TransportAssignments::TransportDriverId))
                    .col(uuid_ref(TransportAssignments::AcademicYearId))
                    .col(ColumnDef::new(TransportAssignments::StartsOn).date().not_null())
                    .col(ColumnDef::new(TransportAssignments::EndsOn).date().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_transport_assignments_transport_route_id",
                        TransportAssignments::Table,
                        TransportAssignments::TransportRouteId,
                        TransportRoutes::Table,
                        TransportRoutes::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_transport_assignments_transport_vehicle_id",
                        TransportAssignments::Table,
                        TransportAssignments::TransportVehicleId,
                        TransportVehicles::Table,
                        TransportVehicles::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_transport_assignments_transport_driver_id",
                        TransportAssignments::Table,
                        TransportAssignments::TransportDriverId,
                        TransportDrivers::Table,
                        TransportDrivers::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_transport_assignments_academic_year_id",
                        TransportAssignments::Table,
                        TransportAssignments::AcademicYearId,
                        AcademicYears::Table,
                        AcademicYears::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TransportSubscriptions::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, TransportSubscriptions::Id))
                    .col(uuid_ref(TransportSubscriptions::StudentId))
                    .col(uuid_ref(TransportSubscriptions::TransportRouteId))
                    .col(uuid_ref_null(TransportSubscriptions::TransportStopId))
                    .col(ColumnDef::new(TransportSubscriptions::StartsOn).date().not_null())
                    .col(ColumnDef::new(TransportSubscriptions::EndsOn).date().null())
                    .col(
                        ColumnDef::new(TransportSubscriptions::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_transport_subscriptions_student_id",
                        TransportSubscriptions::Table,
                        TransportSubscriptions::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_transport_subscriptions_transport_route_id",
                        TransportSubscriptions::Table,
                        TransportSubscriptions::TransportRouteId,
                        TransportRoutes::Table,
                        TransportRoutes::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_transport_subscriptions_transport_stop_id",
                        TransportSubscriptions::Table,
                        TransportSubscriptions::TransportStopId,
                        TransportStops::Table,
                        TransportStops::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_transport_subscriptions_student_route",
                TransportSubscriptions::Table,
                [
                    TransportSubscriptions::StudentId,
                    TransportSubscriptions::TransportRouteId,
                ],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TransportTrips::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, TransportTrips::Id))
                    .col(uuid_ref(TransportTrips::TransportAssignmentId))
                    .col(ColumnDef::new(TransportTrips::TripDate).date().not_null())
                    .col(
                        ColumnDef::new(TransportTrips::Direction)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransportTrips::DepartedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TransportTrips::ArrivedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(TransportTrips::OdometerStart).integer().null())
                    .col(ColumnDef::new(TransportTrips::OdometerEnd).integer().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_transport_trips_transport_assignment_id",
                        TransportTrips::Table,
                        TransportTrips::TransportAssignmentId,
                        TransportAssignments::Table,
                        TransportAssignments::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_transport_trips_assignment_date",
                TransportTrips::Table,
                [TransportTrips::TransportAssignmentId, TransportTrips::TripDate],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TransportMaintenanceRecords::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, TransportMaintenanceRecords::Id))
                    .col(uuid_ref(TransportMaintenanceRecords::TransportVehicleId))
                    .col(
                        ColumnDef::new(TransportMaintenanceRecords::ServicedOn)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransportMaintenanceRecords::Description)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransportMaintenanceRecords::Cost)
                            .decimal_len(10, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TransportMaintenanceRecords::NextServiceOn)
                            .date()
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_transport_maintenance_records_transport_vehicle_id",
                        TransportMaintenanceRecords::Table,
                        TransportMaintenanceRecords::TransportVehicleId,
                        TransportVehicles::Table,
                        TransportVehicles::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(
            manager,
            &[
                "transport_maintenance_records",
                "transport_trips",
                "transport_subscriptions",
                "transport_assignments",
            ],
        )
        .await
    }
}

#[derive(DeriveIden)]
enum AcademicYears {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum TransportRoutes {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum TransportStops {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum TransportVehicles {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum TransportDrivers {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum TransportAssignments {
    Table,
    Id,
    TransportRouteId,
    TransportVehicleId,
    TransportDriverId,
    AcademicYearId,
    StartsOn,
    EndsOn,
}

#[derive(DeriveIden)]
enum TransportSubscriptions {
    Table,
    Id,
    StudentId,
    TransportRouteId,
    TransportStopId,
    StartsOn,
    EndsOn,
    Status,
}

#[derive(DeriveIden)]
enum TransportTrips {
    Table,
    Id,
    TransportAssignmentId,
    TripDate,
    Direction,
    DepartedAt,
    ArrivedAt,
    OdometerStart,
    OdometerEnd,
}

#[derive(DeriveIden)]
enum TransportMaintenanceRecords {
    Table,
    Id,
    TransportVehicleId,
    ServicedOn,
    Description,
    Cost,
    NextServiceOn,
}
