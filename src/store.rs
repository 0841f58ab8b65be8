use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, SqlErr, TransactionTrait,
    sea_query::{Expr, NullOrdering, Order},
};

use crate::{
    entities::movie,
    models::{Movie, MovieEdit, NewMovie},
    ranking,
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("movie {0} not found")]
    NotFound(i32),
    #[error("\"{0}\" is already in the collection")]
    DuplicateTitle(String),
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Db(#[from] DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Handle to the movie table. Cheap to clone; every call commits on its own.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All movies by ranking, unranked ones last.
    pub async fn list(&self) -> StoreResult<Vec<Movie>> {
        let rows = movie::Entity::find()
            .order_by_with_nulls(movie::Column::Ranking, Order::Asc, NullOrdering::Last)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    pub async fn get(&self, id: i32) -> StoreResult<Movie> {
        movie::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Movie::from)
            .ok_or(StoreError::NotFound(id))
    }

    pub async fn count(&self) -> StoreResult<u64> {
        Ok(movie::Entity::find().count(&self.db).await?)
    }

    pub async fn create(&self, new: NewMovie) -> StoreResult<Movie> {
        let title = new.title.trim().to_string();
        if title.is_empty() {
            return Err(StoreError::Validation("title is required".to_string()));
        }
        if let Some(rating) = new.rating {
            check_rating(rating)?;
        }

        let model = movie::ActiveModel {
            title: Set(title.clone()),
            year: Set(new.year),
            description: Set(new.description),
            rating: Set(new.rating),
            ranking: Set(None),
            review: Set(new.review),
            img_url: Set(new.img_url),
            ..Default::default()
        };

        let res = movie::Entity::insert(model).exec(&self.db).await.map_err(|err| {
            match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    StoreError::DuplicateTitle(title.clone())
                }
                _ => StoreError::Db(err),
            }
        })?;

        tracing::info!(id = res.last_insert_id, %title, "movie added");
        self.get(res.last_insert_id).await
    }

    pub async fn update(&self, id: i32, edit: MovieEdit) -> StoreResult<Movie> {
        check_rating(edit.rating)?;

        let res = movie::Entity::update_many()
            .col_expr(movie::Column::Rating, Expr::value(edit.rating))
            .col_expr(movie::Column::Review, Expr::value(edit.review))
            .filter(movie::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        if res.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }

        tracing::info!(id, rating = edit.rating, "movie updated");
        self.get(id).await
    }

    pub async fn delete(&self, id: i32) -> StoreResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        tracing::info!(id, "movie deleted");
        Ok(())
    }

    /// Reassigns every ranking from the current ratings, persists the rows
    /// that changed in one transaction, and returns the list in ranking order.
    pub async fn recompute_rankings(&self) -> StoreResult<Vec<Movie>> {
        let movies: Vec<Movie> = movie::Entity::find()
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Movie::from)
            .collect();

        let changed: Vec<(i32, i32)> = ranking::assign(&movies)
            .into_iter()
            .filter(|(id, rank)| {
                movies.iter().find(|m| m.id == *id).is_some_and(|m| m.ranking != Some(*rank))
            })
            .collect();

        if !changed.is_empty() {
            let txn = self.db.begin().await?;
            for (id, rank) in &changed {
                movie::Entity::update_many()
                    .col_expr(movie::Column::Ranking, Expr::value(*rank))
                    .filter(movie::Column::Id.eq(*id))
                    .exec(&txn)
                    .await?;
            }
            txn.commit().await?;
            tracing::debug!(total = movies.len(), changed = changed.len(), "rankings rewritten");
        }

        self.list().await
    }
}

fn check_rating(rating: f64) -> StoreResult<()> {
    if rating.is_finite() && (0.0..=10.0).contains(&rating) {
        Ok(())
    } else {
        Err(StoreError::Validation(format!("rating {rating} is outside 0..=10")))
    }
}
