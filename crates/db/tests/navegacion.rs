//! Integration tests for the navigator listing and the statistics procedures.

mod common;

use escrutinio_core::ballot::BallotParty;
use escrutinio_core::navigator::{summarize_districts, DistrictRecord, TableRecord};
use escrutinio_core::roles::Role;
use escrutinio_core::tally::{SubmissionPlan, VoteTally};
use escrutinio_db::models::foto::CreateFotoMesa;
use escrutinio_db::repositories::{
    DistritoRepo, EstadisticaRepo, FotoRepo, MesaRepo, PartidoRepo, RecintoRepo, ResultadoRepo,
};
use sqlx::PgPool;

use common::*;

struct World {
    d1: i64,
    d2: i64,
    mesas: Vec<i64>,
    partido: i64,
    user_id: i64,
}

/// Two districts, three venues, five tables; the first table is digitized
/// and the second has a photo.
async fn world(pool: &PgPool) -> World {
    let d1 = insert_distrito(pool, "DISTRITO 10").await;
    let d2 = insert_distrito(pool, "DISTRITO 2").await;
    let r1 = insert_recinto(pool, d1, "Colegio Nacional").await;
    let r2 = insert_recinto(pool, d1, "Recintó Ferial").await;
    let r3 = insert_recinto(pool, d2, "Escuela Sur").await;

    let mesas = vec![
        insert_mesa(pool, r1, 1, Some(100), false).await,
        insert_mesa(pool, r1, 2, Some(100), true).await,
        insert_mesa(pool, r2, 3, Some(200), false).await,
        insert_mesa(pool, r3, 4, Some(300), false).await,
        insert_mesa(pool, r3, 5, None, false).await,
    ];
    let partido = insert_partido(pool, "AAA", 1, true).await;
    let user_id = insert_user(pool, "op@example.com", Role::Operador).await;

    let parties: Vec<BallotParty> = PartidoRepo::list_active(pool)
        .await
        .unwrap()
        .iter()
        .map(BallotParty::from)
        .collect();
    let mut tally = VoteTally::new();
    tally.set_votes(partido, 60);
    tally.set_nulls(4);
    let meta = MesaRepo::find_detalle(pool, mesas[0]).await.unwrap().unwrap().meta();
    let plan = SubmissionPlan::build(&meta, &parties, &tally, user_id).unwrap();
    ResultadoRepo::submit(pool, &plan).await.unwrap();

    FotoRepo::create(
        pool,
        &CreateFotoMesa {
            mesa_id: mesas[1],
            usuario_id: user_id,
            origen: "voluntario".into(),
            storage_path: format!("{user_id}/mesa-{}/x.jpg", mesas[1]),
        },
    )
    .await
    .unwrap();

    World {
        d1,
        d2,
        mesas,
        partido,
        user_id,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn navigator_rows_carry_progress_flags(pool: PgPool) {
    let w = world(&pool).await;
    let rows: Vec<TableRecord> = MesaRepo::list_navegacion(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(TableRecord::from)
        .collect();
    assert_eq!(rows.len(), 5);

    let first = rows.iter().find(|r| r.mesa_id == w.mesas[0]).unwrap();
    assert!(first.registrada && first.digitada && !first.con_foto);
    let second = rows.iter().find(|r| r.mesa_id == w.mesas[1]).unwrap();
    assert!(!second.digitada && second.con_foto && second.es_prioridad);

    let by_district = MesaRepo::list_navegacion_by_distrito(&pool, w.d2).await.unwrap();
    assert_eq!(by_district.len(), 2);
    assert!(by_district.iter().all(|r| r.distrito_nombre == "DISTRITO 2"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn district_summary_from_database_rows(pool: PgPool) {
    let w = world(&pool).await;
    let districts: Vec<DistrictRecord> = DistritoRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(DistrictRecord::from)
        .collect();
    let tables: Vec<TableRecord> = MesaRepo::list_navegacion(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(TableRecord::from)
        .collect();

    let summary = summarize_districts(&districts, &tables);
    // Ordered by district number, not by id.
    assert_eq!(summary[0].id, w.d2);
    assert_eq!(summary[1].id, w.d1);
    assert_eq!(summary[1].total_mesas, 3);
    assert_eq!(summary[1].digitadas, 1);
    assert_eq!(summary[1].con_foto, 1);
    assert_eq!(summary[1].pendientes, 2);
    assert_eq!(summary[1].porcentaje, 33);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unnumbered_districts_keep_name_order(pool: PgPool) {
    let urbano = insert_distrito(&pool, "URBANO").await;
    let rural = insert_distrito(&pool, "RURAL").await;
    let tres = insert_distrito(&pool, "DISTRITO 3").await;

    let listed = DistritoRepo::list(&pool).await.unwrap();
    assert_eq!(
        listed.iter().map(|d| d.id).collect::<Vec<_>>(),
        vec![tres, rural, urbano]
    );

    let districts: Vec<DistrictRecord> = listed.into_iter().map(DistrictRecord::from).collect();
    let summary = summarize_districts(&districts, &[]);
    assert_eq!(
        summary.iter().map(|d| d.id).collect::<Vec<_>>(),
        vec![rural, urbano, tres]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn distribution_procedures(pool: PgPool) {
    let w = world(&pool).await;

    let distritos = EstadisticaRepo::distritos(&pool).await.unwrap();
    let d1 = distritos.iter().find(|d| d.id == w.d1).unwrap();
    let d2 = distritos.iter().find(|d| d.id == w.d2).unwrap();
    assert_eq!(d1.total_habilitados, 400);
    assert_eq!(d2.total_habilitados, 300);
    assert!((d1.porcentaje - 400.0 * 100.0 / 700.0).abs() < 1e-9);

    let recintos = EstadisticaRepo::recintos(&pool, w.d1).await.unwrap();
    assert_eq!(recintos.len(), 2);
    let total: f64 = recintos.iter().map(|r| r.porcentaje).sum();
    assert!((total - 100.0).abs() < 1e-9);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn party_and_progress_procedures(pool: PgPool) {
    let w = world(&pool).await;

    let partidos = EstadisticaRepo::partidos(&pool, None).await.unwrap();
    assert_eq!(partidos.len(), 1);
    assert_eq!(partidos[0].id, w.partido);
    assert_eq!(partidos[0].votos, 60);
    assert_eq!(partidos[0].porcentaje, 100.0);

    let scoped = EstadisticaRepo::partidos(&pool, Some(w.d2)).await.unwrap();
    assert_eq!(scoped[0].votos, 0);
    assert_eq!(scoped[0].porcentaje, 0.0);

    let avance = EstadisticaRepo::avance(&pool, None).await.unwrap();
    assert_eq!(avance.mesas_total, 5);
    assert_eq!(avance.mesas_computadas, 1);
    assert!((avance.porcentaje - 20.0).abs() < 1e-9);
    assert_eq!(avance.votos_validos, 60);
    assert_eq!(avance.votos_nulos, 4);

    let avance_d1 = EstadisticaRepo::avance(&pool, Some(w.d1)).await.unwrap();
    assert_eq!(avance_d1.mesas_total, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn photos_and_venue_listings(pool: PgPool) {
    let w = world(&pool).await;

    let second = FotoRepo::create(
        &pool,
        &CreateFotoMesa {
            mesa_id: w.mesas[1],
            usuario_id: w.user_id,
            origen: "voluntario".into(),
            storage_path: "dup.jpg".into(),
        },
    )
    .await
    .unwrap();

    // Duplicates are allowed; newest first.
    let mias = FotoRepo::list_by_usuario(&pool, w.user_id).await.unwrap();
    assert_eq!(mias.len(), 2);
    assert_eq!(mias[0].id, second.id);

    let recintos = RecintoRepo::list_with_distrito(&pool).await.unwrap();
    assert_eq!(recintos[0].nombre, "Colegio Nacional");
    assert_eq!(recintos[0].distrito_nombre, "DISTRITO 10");

    let opciones = MesaRepo::list_opciones_by_recinto(&pool, recintos[0].id).await.unwrap();
    assert_eq!(
        opciones.iter().map(|m| m.numero_mesa).collect::<Vec<_>>(),
        vec![1, 2]
    );
}
