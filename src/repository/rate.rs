use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::rate::{RateRow, Region},
    models::rate::{GroupRate, KashmirRate, NewGroupRate, NewKashmirRate},
    repository::{DieselRepository, RateReader, RateWriter},
};

/// Loads every row of a group rate table, optionally filtered by trip-code prefix.
macro_rules! load_group_rates {
    ($conn:expr, $table:ident, $prefix:expr) => {{
        use crate::schema::$table;

        let mut query = $table::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(prefix) = $prefix {
            query = query.filter($table::trip_code.like(format!("{prefix}%")));
        }

        query
            .order(($table::trip_code.asc(), $table::id.asc()))
            .load::<GroupRate>($conn)?
            .into_iter()
            .map(RateRow::from)
            .collect::<Vec<RateRow>>()
    }};
}

/// Replaces the contents of a group rate table.
macro_rules! replace_group_rates {
    ($conn:expr, $table:ident, $rows:expr) => {{
        use crate::schema::$table;

        diesel::delete($table::table).execute($conn)?;

        let mut stored = 0usize;
        for row in $rows {
            let row = NewGroupRate::from(row);
            stored += diesel::insert_into($table::table)
                .values((
                    $table::sl_code.eq(row.sl_code),
                    $table::trip_code.eq(row.trip_code),
                    $table::details.eq(row.details),
                    $table::itinerary.eq(row.itinerary),
                    $table::pax15plus1.eq(row.pax15plus1),
                    $table::pax20plus2.eq(row.pax20plus2),
                    $table::pax25plus2.eq(row.pax25plus2),
                    $table::pax30plus2.eq(row.pax30plus2),
                    $table::pax35plus2.eq(row.pax35plus2),
                    $table::pax40plus3.eq(row.pax40plus3),
                    $table::pax45plus3.eq(row.pax45plus3),
                ))
                .execute($conn)?;
        }
        stored
    }};
}

impl RateReader for DieselRepository {
    fn list_rates(
        &self,
        region: Region,
        trip_code_prefix: Option<&str>,
    ) -> RepositoryResult<Vec<RateRow>> {
        let mut conn = self.conn()?;
        let conn = &mut conn;

        let mut rows = match region {
            Region::South => load_group_rates!(conn, south_rates, trip_code_prefix),
            Region::North => load_group_rates!(conn, north_rates, trip_code_prefix),
            Region::Northeast => load_group_rates!(conn, northeast_rates, trip_code_prefix),
            Region::International => {
                load_group_rates!(conn, international_rates, trip_code_prefix)
            }
            Region::Kashmir => {
                use crate::schema::kashmir_rates;

                let mut query = kashmir_rates::table.into_boxed::<diesel::sqlite::Sqlite>();
                if let Some(prefix) = trip_code_prefix {
                    query = query.filter(kashmir_rates::trip_code.like(format!("{prefix}%")));
                }

                query
                    .order((kashmir_rates::trip_code.asc(), kashmir_rates::id.asc()))
                    .select(KashmirRate::as_select())
                    .load::<KashmirRate>(conn)?
                    .into_iter()
                    .map(RateRow::from)
                    .collect()
            }
        };

        // SQLite `LIKE` ignores ASCII case; trip-code prefixes do not.
        if let Some(prefix) = trip_code_prefix {
            rows.retain(|row| row.trip_code.starts_with(prefix));
        }

        Ok(rows)
    }
}

impl RateWriter for DieselRepository {
    fn replace_rates(&self, region: Region, rows: &[RateRow]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            let stored = match region {
                Region::South => replace_group_rates!(conn, south_rates, rows),
                Region::North => replace_group_rates!(conn, north_rates, rows),
                Region::Northeast => replace_group_rates!(conn, northeast_rates, rows),
                Region::International => replace_group_rates!(conn, international_rates, rows),
                Region::Kashmir => {
                    use crate::schema::kashmir_rates;

                    diesel::delete(kashmir_rates::table).execute(conn)?;

                    let payload: Vec<NewKashmirRate> = rows.iter().map(Into::into).collect();
                    let mut stored = 0usize;
                    for row in &payload {
                        stored += diesel::insert_into(kashmir_rates::table)
                            .values(row)
                            .execute(conn)?;
                    }
                    stored
                }
            };

            Ok(stored)
        })
    }
}
