use crate::domain::errors::DomainError;

const CNT_CATEGORY_NAME: &str = "categories_name_key";
const CNT_LEFTOVER_PRODUCT: &str = "leftovers_product_id_fkey";
const CNT_LEFTOVER_QUANTITY: &str = "leftovers_quantity_check";
const CNT_PRODUCT_STOCK: &str = "products_stock_check";
const CNT_PRODUCT_PRICE: &str = "products_price_check";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_CATEGORY_NAME => {
                        DomainError::Conflict("category name already exists".into())
                    }
                    CNT_LEFTOVER_PRODUCT => {
                        DomainError::Conflict("product has leftover records".into())
                    }
                    CNT_LEFTOVER_QUANTITY => {
                        DomainError::Validation("quantity must be greater than 0".into())
                    }
                    CNT_PRODUCT_STOCK => DomainError::InsufficientStock { available: 0 },
                    CNT_PRODUCT_PRICE => {
                        DomainError::Validation("price cannot be negative".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::Conflict("referenced record conflict".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    "22003" => {
                        return DomainError::Validation("numeric value out of range".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::RowNotFound => DomainError::NotFound("record not found".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}
