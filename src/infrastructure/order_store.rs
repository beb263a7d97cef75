use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{
    FlatProjectionRow, ItemId, Member, OrderHeader, OrderId, OrderLine, OrderStatus,
};
use crate::domain::page::PageWindow;
use crate::domain::ports::{
    InventoryRestore, OrderStore, ReadWork, RowSource, UnitOfWork, WriteWork,
};
use crate::schema::{deliveries, items, members, order_items, orders};

use super::models::{
    flat_from_rows, header_from_rows, line_from_rows, DeliveryRow, FlatTuple, HeaderTuple,
    ItemRow, LineTuple, MemberRow, OrderItemRow, OrderRow,
};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// One pooled connection and one transaction per scope. Read scopes are
/// read-only transactions.
pub struct DieselOrderStore {
    pool: DbPool,
}

impl DieselOrderStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderStore for DieselOrderStore {
    fn read_scope(&self, work: ReadWork<'_>) -> Result<(), DomainError> {
        let mut pooled = self.pool.get()?;
        let conn: &mut PgConnection = &mut pooled;

        conn.build_transaction()
            .read_only()
            .run::<_, DomainError, _>(|conn| work(&mut DieselRowSource { conn }))
    }

    fn write_scope(&self, work: WriteWork<'_>) -> Result<(), DomainError> {
        let mut pooled = self.pool.get()?;
        let conn: &mut PgConnection = &mut pooled;

        conn.transaction::<_, DomainError, _>(|conn| work(&mut DieselRowSource { conn }))
    }
}

// ── Row source ────────────────────────────────────────────────────────────────

pub struct DieselRowSource<'a> {
    conn: &'a mut PgConnection,
}

impl RowSource for DieselRowSource<'_> {
    fn order_headers(
        &mut self,
        window: Option<PageWindow>,
    ) -> Result<Vec<OrderHeader>, DomainError> {
        let mut query = orders::table
            .inner_join(members::table)
            .inner_join(deliveries::table)
            .select((
                OrderRow::as_select(),
                MemberRow::as_select(),
                DeliveryRow::as_select(),
            ))
            .order(orders::order_id.asc())
            .into_boxed();

        if let Some(window) = window {
            query = query.offset(window.offset()).limit(window.limit());
        }

        let rows: Vec<HeaderTuple> = query.load(self.conn)?;
        rows.into_iter().map(header_from_rows).collect()
    }

    fn order_header(&mut self, order_id: OrderId) -> Result<Option<OrderHeader>, DomainError> {
        let row: Option<HeaderTuple> = orders::table
            .inner_join(members::table)
            .inner_join(deliveries::table)
            .filter(orders::order_id.eq(order_id))
            .select((
                OrderRow::as_select(),
                MemberRow::as_select(),
                DeliveryRow::as_select(),
            ))
            .first(self.conn)
            .optional()?;

        row.map(header_from_rows).transpose()
    }

    fn order_lines(&mut self, order_ids: &[OrderId]) -> Result<Vec<OrderLine>, DomainError> {
        let rows: Vec<LineTuple> = order_items::table
            .inner_join(items::table)
            .filter(order_items::order_id.eq_any(order_ids))
            .select((OrderItemRow::as_select(), ItemRow::as_select()))
            .order((
                order_items::order_id.asc(),
                order_items::created_at.desc(),
                order_items::order_item_id.desc(),
            ))
            .load(self.conn)?;

        Ok(rows.into_iter().map(line_from_rows).collect())
    }

    fn flat_rows(&mut self) -> Result<Vec<FlatProjectionRow>, DomainError> {
        let rows: Vec<FlatTuple> = orders::table
            .inner_join(members::table)
            .inner_join(deliveries::table)
            .left_join(order_items::table.on(order_items::order_id.eq(orders::order_id)))
            .left_join(items::table.on(items::item_id.eq(order_items::item_id)))
            .select((
                OrderRow::as_select(),
                MemberRow::as_select(),
                DeliveryRow::as_select(),
                Option::<OrderItemRow>::as_select(),
                Option::<ItemRow>::as_select(),
            ))
            .order((
                orders::order_id.asc(),
                order_items::created_at.nullable().desc(),
                order_items::order_item_id.nullable().desc(),
            ))
            .load(self.conn)?;

        rows.into_iter().map(flat_from_rows).collect()
    }

    fn members(&mut self) -> Result<Vec<Member>, DomainError> {
        let rows: Vec<MemberRow> = members::table
            .select(MemberRow::as_select())
            .order(members::member_id.asc())
            .load(self.conn)?;

        Ok(rows.into_iter().map(Member::from).collect())
    }
}

impl InventoryRestore for DieselRowSource<'_> {
    fn restore_stock(&mut self, item_id: ItemId, count: i32) -> Result<(), DomainError> {
        let updated = diesel::update(items::table.filter(items::item_id.eq(item_id)))
            .set(items::stock_quantity.eq(items::stock_quantity + count))
            .execute(self.conn)?;

        if updated != 1 {
            return Err(DomainError::DataIntegrity(format!(
                "item {item_id} disappeared while restoring stock"
            )));
        }
        Ok(())
    }
}

impl UnitOfWork for DieselRowSource<'_> {
    fn rows(&mut self) -> &mut dyn RowSource {
        self
    }

    fn update_order_status(
        &mut self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<(), DomainError> {
        let updated = diesel::update(orders::table.filter(orders::order_id.eq(order_id)))
            .set(orders::status.eq(status.as_str()))
            .execute(self.conn)?;

        if updated == 0 {
            return Err(DomainError::NotFound(order_id));
        }
        Ok(())
    }
}
