use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::expense::{
        Expense as DomainExpense, ExpenseListQuery, NewExpense as DomainNewExpense,
        UpdateExpense as DomainUpdateExpense,
    },
    models::expense::{
        Expense as DbExpense, NewExpense as DbNewExpense, UpdateExpense as DbUpdateExpense,
    },
    repository::{DieselRepository, ExpenseReader, ExpenseWriter, page_bounds},
};

impl ExpenseReader for DieselRepository {
    fn get_expense_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainExpense>> {
        use crate::schema::expenses;

        let mut conn = self.conn()?;
        let expense = expenses::table
            .filter(expenses::id.eq(id))
            .filter(expenses::hub_id.eq(hub_id))
            .first::<DbExpense>(&mut conn)
            .optional()?;

        Ok(expense.map(Into::into))
    }

    fn list_expenses(
        &self,
        query: ExpenseListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainExpense>)> {
        use crate::schema::expenses;

        let mut conn = self.conn()?;

        let category_filter = query.category.map(|category| category.as_str());

        let mut count_query = expenses::table
            .filter(expenses::hub_id.eq(query.hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(trip_id) = query.trip_id {
            count_query = count_query.filter(expenses::trip_id.eq(Some(trip_id)));
        }

        if let Some(category) = category_filter {
            count_query = count_query.filter(expenses::category.eq(category));
        }

        if let Some(date) = query.spent_from {
            count_query = count_query.filter(expenses::spent_on.ge(date));
        }

        if let Some(date) = query.spent_before {
            count_query = count_query.filter(expenses::spent_on.lt(date));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = expenses::table
            .filter(expenses::hub_id.eq(query.hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(trip_id) = query.trip_id {
            items = items.filter(expenses::trip_id.eq(Some(trip_id)));
        }

        if let Some(category) = category_filter {
            items = items.filter(expenses::category.eq(category));
        }

        if let Some(date) = query.spent_from {
            items = items.filter(expenses::spent_on.ge(date));
        }

        if let Some(date) = query.spent_before {
            items = items.filter(expenses::spent_on.lt(date));
        }

        items = items.order((expenses::spent_on.desc(), expenses::id.desc()));

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = page_bounds(pagination.page, pagination.per_page);
            items = items.offset(offset).limit(limit);
        }

        let db_expenses = items.load::<DbExpense>(&mut conn)?;

        Ok((total, db_expenses.into_iter().map(Into::into).collect()))
    }
}

impl ExpenseWriter for DieselRepository {
    fn create_expense(&self, new_expense: &DomainNewExpense) -> RepositoryResult<DomainExpense> {
        use crate::schema::expenses;

        let mut conn = self.conn()?;
        let db_new = DbNewExpense::from(new_expense);

        let created = diesel::insert_into(expenses::table)
            .values(&db_new)
            .get_result::<DbExpense>(&mut conn)?;

        Ok(created.into())
    }

    fn update_expense(
        &self,
        expense_id: i32,
        hub_id: i32,
        updates: &DomainUpdateExpense,
    ) -> RepositoryResult<DomainExpense> {
        use crate::schema::expenses;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateExpense::from(updates);

        let target = expenses::table
            .filter(expenses::id.eq(expense_id))
            .filter(expenses::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbExpense>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_expense(&self, expense_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::expenses;

        let mut conn = self.conn()?;

        let target = expenses::table
            .filter(expenses::id.eq(expense_id))
            .filter(expenses::hub_id.eq(hub_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
