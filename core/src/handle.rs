//! Read and write orchestration over a [`Store`].
//!
//! Every operation compiles its where clause, runs one collaborator round trip and maps the
//! result. Round trips are logged with their elapsed time and row count.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use bson::{doc, Bson, Document};
use docql::pipeline::{count_pipeline, group_pipeline};
use docql::selection::group::{ungroup_counts, ungroup_rows};
use docql::selection::sort::compile_order_by;
use tracing::{error, info};

use crate::config::DatabaseConfig;
use crate::decode::{check_destination, decode_into, Decode};
use crate::encode::{encode_document, Encode};
use crate::error::{HandleError, MapError};
use crate::query::{Query, Record};
use crate::shape::Shape;
use crate::storage::{Collection, FindOptions, Store, StoreError};

/// Read side of a document database
#[async_trait]
pub trait Source: Send + Sync {
    /// Replace the query's rows with the matching documents. With a group-by the rows are the
    /// distinct groups, and the destination must be a mapping.
    async fn get<T>(&self, collection: &str, query: Query<'_, T>) -> Result<(), HandleError>
    where T: Decode + Send;

    /// Count matching documents. With a group-by this is the number of groups, and the
    /// `{group, count}` rows are written to the query's rows if it has any.
    async fn count<T>(&self, collection: &str, query: Query<'_, T>) -> Result<i64, HandleError>
    where T: Decode + Send;
}

/// Write side of a document database
#[async_trait]
pub trait Sink: Send + Sync {
    /// Update the documents selected by the record's where clause, or insert the row when the
    /// where clause is empty or matches nothing.
    async fn upsert<R>(&self, collection: &str, record: Record<'_, R>) -> Result<(), HandleError>
    where R: Encode + Sync + ?Sized;
}

pub struct DocumentHandle<S> {
    store: S,
    config: DatabaseConfig,
}

impl<S: Store> DocumentHandle<S> {
    pub fn new(store: S, config: DatabaseConfig) -> Result<Self, HandleError> {
        config.validate()?;
        info!("Using database {} at {}", config.name, config.redacted_url()?);
        Ok(Self { store, config })
    }

    pub fn config(&self) -> &DatabaseConfig { &self.config }

    pub fn store(&self) -> &S { &self.store }

    async fn collection(&self, name: &str) -> Result<Arc<dyn Collection>, HandleError> {
        if name.is_empty() {
            return Err(HandleError::EmptyCollectionName);
        }
        self.store.collection(name).await.map_err(|e| store_failure("Failed to open the collection", e))
    }

    async fn get_grouped<T: Decode + Send>(&self, name: &str, query: Query<'_, T>) -> Result<(), HandleError> {
        if T::SHAPE != Shape::Mapping {
            return Err(MapError::ShapeMismatch { expected: "reference to a []map", found: std::any::type_name::<Vec<T>>() }.into());
        }
        let destination = query.rows.ok_or(HandleError::MissingDestination)?;
        let collection = self.collection(name).await?;
        let filter = compile_filter(&query.where_clause, &query.args)?;
        let pipeline = group_pipeline(&filter, &query.group_by, &query.order_by, query.offset, query.limit);

        let started = Instant::now();
        let rows = collection.aggregate(pipeline.clone()).await.map_err(|e| store_failure("Failed to query the database", e))?;
        info!("[{}ms] [rows: {}] {}.aggregate(pipeline: {:?})", started.elapsed().as_millis(), rows.len(), name, pipeline);

        let rows = ungroup_rows(rows)?;
        decode_into(rows, destination).map_err(copy_failure)?;
        Ok(())
    }
}

#[async_trait]
impl<S: Store> Source for DocumentHandle<S> {
    async fn get<T>(&self, name: &str, query: Query<'_, T>) -> Result<(), HandleError>
    where T: Decode + Send {
        if name.is_empty() {
            return Err(HandleError::EmptyCollectionName);
        }
        if !query.group_by.is_empty() {
            // grouping goes through the aggregation pipeline instead of find
            return self.get_grouped(name, query).await;
        }

        check_destination::<T>()?;
        let destination = query.rows.ok_or(HandleError::MissingDestination)?;
        let collection = self.collection(name).await?;
        let filter = compile_filter(&query.where_clause, &query.args)?;
        let options = FindOptions { limit: query.limit, skip: query.offset, sort: compile_order_by(&query.order_by) };

        let started = Instant::now();
        let rows = collection.find(filter.clone(), options.clone()).await.map_err(|e| store_failure("Failed to query the database", e))?;
        info!("[{}ms] [rows: {}] {}.find(filter: {}, opts: {})", started.elapsed().as_millis(), rows.len(), name, filter, options);

        decode_into(rows, destination).map_err(copy_failure)?;
        Ok(())
    }

    async fn count<T>(&self, name: &str, query: Query<'_, T>) -> Result<i64, HandleError>
    where T: Decode + Send {
        let collection = self.collection(name).await?;
        let filter = compile_filter(&query.where_clause, &query.args)?;
        let pipeline = count_pipeline(&filter, &query.group_by);

        let started = Instant::now();
        let rows = collection.aggregate(pipeline.clone()).await.map_err(|e| store_failure("Failed to query the database", e))?;
        info!("[{}ms] [rows: {}] {}.aggregate(pipeline: {:?})", started.elapsed().as_millis(), rows.len(), name, pipeline);

        // no rows when $match selects nothing
        let Some(first) = rows.first() else {
            return Ok(0);
        };

        if query.group_by.is_empty() {
            return match first.get("count") {
                Some(Bson::Int32(n)) => Ok(i64::from(*n)),
                Some(Bson::Int64(n)) => Ok(*n),
                other => {
                    error!("Failed to retrieve the total count of records, got {:?}", other);
                    Err(HandleError::MissingCount)
                }
            };
        }

        let groups = ungroup_counts(rows)?;
        let total = groups.len() as i64;
        if let Some(destination) = query.rows {
            decode_into(groups, destination).map_err(copy_failure)?;
        }
        Ok(total)
    }
}

#[async_trait]
impl<S: Store> Sink for DocumentHandle<S> {
    async fn upsert<R>(&self, name: &str, record: Record<'_, R>) -> Result<(), HandleError>
    where R: Encode + Sync + ?Sized {
        let collection = self.collection(name).await?;
        let filter = compile_filter(&record.where_clause, &record.args)?;
        let row = encode_document(record.row)?;

        let mut insert = filter.is_empty();
        if !insert {
            let update = doc! { "$set": row.clone() };
            let started = Instant::now();
            let result = collection.update_many(filter.clone(), update.clone()).await.map_err(|e| store_failure("Failed to update the record", e))?;
            info!("[{}ms] [rows: {}] {}.update_many(filter: {}, update: {})", started.elapsed().as_millis(), result.matched, name, filter, update);
            insert = result.matched == 0;
        }

        if insert {
            let started = Instant::now();
            let logged = row.to_string();
            collection.insert_one(row).await.map_err(|e| store_failure("Failed to insert the record", e))?;
            info!("[{}ms] [rows: 1] {}.insert_one(document: {})", started.elapsed().as_millis(), name, logged);
        }

        Ok(())
    }
}

fn compile_filter(where_clause: &str, args: &[Bson]) -> Result<Document, HandleError> {
    docql::compile_where(where_clause, args).map_err(|e| {
        error!("Failed to parse where clause. {}", e);
        HandleError::InvalidQuery(e)
    })
}

fn store_failure(context: &str, err: StoreError) -> HandleError {
    error!("{}. {}", context, err);
    HandleError::Store(err)
}

fn copy_failure(err: MapError) -> HandleError {
    error!("Failed to copy retrieved records. {}", err);
    HandleError::Map(err)
}
