use sqlx::PgPool;

/// Full bootstrap: connect, migrate, verify lookup data and procedures.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    escrutinio_db::health_check(&pool).await.unwrap();

    for table in ["mesa_estados", "roles"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert!(count.0 > 0, "{table} should have seed data, got 0 rows");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mesa_estados_seed_order(pool: PgPool) {
    let rows: Vec<(i16, String)> = sqlx::query_as("SELECT id, name FROM mesa_estados ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(
        rows,
        vec![(1, "pendiente".to_string()), (2, "registrado".to_string())]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_procedures_answer_on_empty_database(pool: PgPool) {
    use escrutinio_db::repositories::EstadisticaRepo;

    assert!(EstadisticaRepo::distritos(&pool).await.unwrap().is_empty());
    assert!(EstadisticaRepo::partidos(&pool, None).await.unwrap().is_empty());

    let avance = EstadisticaRepo::avance(&pool, None).await.unwrap();
    assert_eq!(avance.mesas_total, 0);
    assert_eq!(avance.porcentaje, 0.0);
}
