//! Migration to create transport routes, stops, vehicles and drivers.

use sea_orm_migration::prelude::*;

use crate::common::{
    cascade, created_at, drop_tables, unique_index, updated_at, uuid_pk, uuid_ref,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TransportRoutes::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, TransportRoutes::Id))
                    .col(uuid_ref(TransportRoutes::InstitutionId))
                    .col(ColumnDef::new(TransportRoutes::Name).string().not_null())
                    .col(
                        ColumnDef::new(TransportRoutes::Code)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(TransportRoutes::Description).text().null())
                    .col(
                        ColumnDef::new(TransportRoutes::Fare)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_transport_routes_institution_id",
                        TransportRoutes::Table,
                        TransportRoutes::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TransportStops::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, TransportStops::Id))
                    .col(uuid_ref(TransportStops::TransportRouteId))
                    .col(ColumnDef::new(TransportStops::Name).string().not_null())
                    .col(ColumnDef::new(TransportStops::Latitude).decimal_len(10, 7).null())
                    .col(ColumnDef::new(TransportStops::Longitude).decimal_len(10, 7).null())
                    .col(ColumnDef::new(TransportStops::Sequence).small_integer().not_null())
                    .col(ColumnDef::new(TransportStops::PickupTime).time().null())
                    .col(ColumnDef::new(TransportStops::DropTime).time().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_transport_stops_transport_route_id",
                        TransportStops::Table,
                        TransportStops::TransportRouteId,
                        TransportRoutes::Table,
                        TransportRoutes::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_transport_stops_route_sequence",
                TransportStops::Table,
                [TransportStops::TransportRouteId, TransportStops::Sequence],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TransportVehicles::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, TransportVehicles::Id))
                    .col(uuid_ref(TransportVehicles::InstitutionId))
                    .col(
                        ColumnDef::new(TransportVehicles::RegistrationNumber)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(TransportVehicles::Model).string().null())
                    .col(ColumnDef::new(TransportVehicles::Capacity).small_integer().not_null())
                    .col(
                        ColumnDef::new(TransportVehicles::InsuranceExpiresOn)
                            .date()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TransportVehicles::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_transport_vehicles_institution_id",
                        TransportVehicles::Table,
                        TransportVehicles::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TransportDrivers::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, TransportDrivers::Id))
                    .col(uuid_ref(TransportDrivers::StaffId).unique_key().to_owned())
                    .col(
                        ColumnDef::new(TransportDrivers::LicenseNumber)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(TransportDrivers::LicenseExpiresOn).date().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_transport_drivers_staff_id",
                        TransportDrivers::Table,
                        TransportDrivers::StaffId,
                        Staff::Table,
                        Staff::Id,
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
                "transport_drivers",
                "transport_vehicles",
                "transport_stops",
                "transport_routes",
            ],
        )
        .await
    }
}

#[derive(DeriveIden)]
enum Institutions {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Staff {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum TransportRoutes {
    Table,
    Id,
    InstitutionId,
    Name,
    Code,
    Description,
    Fare,
}

#[derive(DeriveIden)]
enum TransportStops {
    Table,
    Id,
    TransportRouteId,
    Name,
    Latitude,
    Longitude,
    Sequence,
    PickupTime,
    DropTime,
}

#[derive(DeriveIden)]
enum TransportVehicles {
    Table,
    Id,
    InstitutionId,
    RegistrationNumber,
    Model,
    Capacity,
    InsuranceExpiresOn,
    Status,
}

#[derive(DeriveIden)]
enum TransportDrivers {
    Table,
    Id,
    StaffId,
    LicenseNumber,
    LicenseExpiresOn,
}
