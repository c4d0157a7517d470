use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, Sqlite, Transaction};
use uuid::Uuid;

use workout_core::model::Categoria;
use workout_core::page::Page;

/// The request-scoped unit of work against the store.
pub type Uow = Transaction<'static, Sqlite>;

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(url: &str) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await?;
        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS categorias (
                id TEXT PRIMARY KEY,
                nome TEXT NOT NULL UNIQUE
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Opens the unit of work for one request. Commit and rollback belong to
    /// the fault boundary; the queries below only borrow the transaction.
    pub async fn begin(&self) -> Result<Uow, sqlx::Error> {
        self.pool.begin().await
    }

    pub async fn insert_categoria(uow: &mut Uow, categoria: &Categoria) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO categorias (id, nome) VALUES (?, ?)")
            .bind(categoria.id.to_string())
            .bind(&categoria.nome)
            .execute(&mut **uow)
            .await?;
        Ok(())
    }

    pub async fn get_categoria(uow: &mut Uow, id: Uuid) -> Result<Option<Categoria>, sqlx::Error> {
        let row = sqlx::query("SELECT id, nome FROM categorias WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&mut **uow)
            .await?;
        row.as_ref().map(row_to_categoria).transpose()
    }

    pub async fn list_categorias(
        uow: &mut Uow,
        limit: i64,
        offset: i64,
    ) -> Result<Page<Categoria>, sqlx::Error> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categorias")
            .fetch_one(&mut **uow)
            .await?;
        let rows = sqlx::query("SELECT id, nome FROM categorias ORDER BY nome LIMIT ? OFFSET ?")
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **uow)
            .await?;
        let items = rows
            .iter()
            .map(row_to_categoria)
            .collect::<Result<_, _>>()?;
        Ok(Page {
            items,
            total,
            limit,
            offset,
        })
    }
}

fn row_to_categoria(row: &SqliteRow) -> Result<Categoria, sqlx::Error> {
    let id: String = row.get("id");
    let id = Uuid::parse_str(&id).map_err(|e| sqlx::Error::ColumnDecode {
        index: "id".into(),
        source: Box::new(e),
    })?;
    Ok(Categoria {
        id,
        nome: row.get("nome"),
    })
}
