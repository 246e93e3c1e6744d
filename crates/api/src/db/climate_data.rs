use async_trait::async_trait;
use log::{info, warn, LevelFilter};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteRow},
    ConnectOptions, Connection, Row, Sqlite, SqliteConnection,
};
use std::path::Path;
use time::Date;

use super::{
    parse_date, ActiveStation, Aggregate, DateRange, DateWindow, PrecipitationReading, Schema,
    StationSummary, TemperatureReading,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Failed to parse stored date: {0}")]
    DateParse(#[from] time::error::Parse),
    #[error("Table not found: {0}")]
    MissingTable(String),
    #[error("Table {table} is missing column {column}")]
    MissingColumn { table: String, column: String },
}

#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Every (date, precipitation) pair, unfiltered
    async fn precipitation(&self) -> Result<Vec<PrecipitationReading>, Error>;
    /// Per-station metadata with min/max/avg of precipitation and temperature
    async fn station_summaries(&self) -> Result<Vec<StationSummary>, Error>;
    async fn most_active_station(&self) -> Result<Option<ActiveStation>, Error>;
    async fn station_temperatures(
        &self,
        station_id: String,
        window: DateWindow,
    ) -> Result<Vec<TemperatureReading>, Error>;
    async fn date_range(&self) -> Result<Option<DateRange>, Error>;
    /// Temperature aggregates from `start` onwards, bounded by `end` when given
    async fn temperature_stats(&self, start: Date, end: Option<Date>) -> Result<Aggregate, Error>;
}

pub struct ClimateAccess {
    options: SqliteConnectOptions,
    schema: Schema,
}

impl ClimateAccess {
    /// Reflects and verifies the schema of an existing database file.
    /// The file is only ever opened read-only.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .log_statements(LevelFilter::Debug);

        let mut conn = options.connect().await?;
        let schema = Schema::reflect(&mut conn).await;
        close(conn).await;

        let schema = schema?;
        schema.verify()?;
        info!(
            "reflected {} ({} columns) and {} ({} columns) from {}",
            schema.measurement.name,
            schema.measurement.columns.len(),
            schema.station.name,
            schema.station.columns.len(),
            path.display()
        );

        Ok(Self { options, schema })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Opens a fresh connection per request, nothing is shared between requests
    pub async fn open_connection(&self) -> Result<SqliteConnection, sqlx::Error> {
        self.options.connect().await
    }
}

async fn close(conn: SqliteConnection) {
    if let Err(e) = conn.close().await {
        warn!("error closing sqlite connection: {}", e);
    }
}

fn row_to_summary(row: &SqliteRow) -> Result<StationSummary, sqlx::Error> {
    Ok(StationSummary {
        station_id: row.try_get("station_id")?,
        name: row.try_get("name")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        elevation: row.try_get("elevation")?,
        precipitation: Aggregate {
            min: row.try_get("prcp_min")?,
            max: row.try_get("prcp_max")?,
            avg: row.try_get("prcp_avg")?,
        },
        temperature: Aggregate {
            min: row.try_get("tobs_min")?,
            max: row.try_get("tobs_max")?,
            avg: row.try_get("tobs_avg")?,
        },
    })
}

#[async_trait]
impl ClimateData for ClimateAccess {
    async fn precipitation(&self) -> Result<Vec<PrecipitationReading>, Error> {
        let mut conn = self.open_connection().await?;
        let rows: Result<Vec<(String, Option<f64>)>, sqlx::Error> =
            sqlx::query_as("SELECT date, prcp FROM measurement")
                .fetch_all(&mut conn)
                .await;
        close(conn).await;

        Ok(rows?
            .into_iter()
            .map(|(date, precipitation)| PrecipitationReading {
                date,
                precipitation,
            })
            .collect())
    }

    async fn station_summaries(&self) -> Result<Vec<StationSummary>, Error> {
        let mut conn = self.open_connection().await?;
        let rows = sqlx::query(
            "SELECT m.station AS station_id,
                    COALESCE(s.name, '') AS name,
                    s.latitude AS latitude,
                    s.longitude AS longitude,
                    s.elevation AS elevation,
                    MIN(m.prcp) AS prcp_min,
                    MAX(m.prcp) AS prcp_max,
                    AVG(m.prcp) AS prcp_avg,
                    MIN(m.tobs) AS tobs_min,
                    MAX(m.tobs) AS tobs_max,
                    AVG(m.tobs) AS tobs_avg
             FROM measurement m
             JOIN station s ON m.station = s.station
             GROUP BY m.station
             ORDER BY m.station",
        )
        .fetch_all(&mut conn)
        .await;
        close(conn).await;

        let summaries = rows?
            .iter()
            .map(row_to_summary)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(summaries)
    }

    async fn most_active_station(&self) -> Result<Option<ActiveStation>, Error> {
        let mut conn = self.open_connection().await?;
        let row: Result<Option<(String, String, i64)>, sqlx::Error> = sqlx::query_as(
            "SELECT counts.station,
                    COALESCE(
                        (SELECT s.name FROM station s WHERE s.station = counts.station LIMIT 1),
                        ''
                    ),
                    counts.observations
             FROM (
                 SELECT station, COUNT(*) AS observations
                 FROM measurement
                 GROUP BY station
             ) AS counts
             ORDER BY counts.observations DESC, counts.station ASC
             LIMIT 1",
        )
        .fetch_optional(&mut conn)
        .await;
        close(conn).await;

        Ok(row?.map(|(station_id, name, observations)| ActiveStation {
            station_id,
            name,
            observations,
        }))
    }

    async fn station_temperatures(
        &self,
        station_id: String,
        window: DateWindow,
    ) -> Result<Vec<TemperatureReading>, Error> {
        let mut conn = self.open_connection().await?;
        let rows: Result<Vec<(String, Option<f64>)>, sqlx::Error> = sqlx::query_as(
            "SELECT date, tobs FROM measurement
             WHERE station = ? AND date >= ? AND date <= ?
             ORDER BY date",
        )
        .bind(&station_id)
        .bind(window.start.to_string())
        .bind(window.end.to_string())
        .fetch_all(&mut conn)
        .await;
        close(conn).await;

        Ok(rows?
            .into_iter()
            .map(|(date, tobs)| TemperatureReading { date, tobs })
            .collect())
    }

    async fn date_range(&self) -> Result<Option<DateRange>, Error> {
        let mut conn = self.open_connection().await?;
        let row: Result<(Option<String>, Option<String>), sqlx::Error> =
            sqlx::query_as("SELECT MIN(date), MAX(date) FROM measurement")
                .fetch_one(&mut conn)
                .await;
        close(conn).await;

        match row? {
            (Some(first), Some(last)) => Ok(Some(DateRange {
                first: parse_date(&first)?,
                last: parse_date(&last)?,
            })),
            _ => Ok(None),
        }
    }

    async fn temperature_stats(&self, start: Date, end: Option<Date>) -> Result<Aggregate, Error> {
        let sql = match end {
            Some(_) => {
                "SELECT MIN(tobs), MAX(tobs), AVG(tobs) FROM measurement
                 WHERE date >= ? AND date <= ?"
            }
            None => "SELECT MIN(tobs), MAX(tobs), AVG(tobs) FROM measurement WHERE date >= ?",
        };

        let mut query =
            sqlx::query_as::<Sqlite, (Option<f64>, Option<f64>, Option<f64>)>(sql)
            .bind(start.to_string());
        if let Some(end) = end {
            query = query.bind(end.to_string());
        }

        let mut conn = self.open_connection().await?;
        let row = query.fetch_one(&mut conn).await;
        close(conn).await;

        let (min, max, avg) = row?;
        Ok(Aggregate { min, max, avg })
    }
}
