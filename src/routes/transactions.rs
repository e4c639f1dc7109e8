use actix_web::{Responder, post, web};
use actix_web_flash_messages::FlashMessage;
use serde::Deserialize;
use validator::Validate;

use crate::forms::transaction::{AddTransactionForm, SaveTransactionForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{DieselRepository, TransactionWriter};
use crate::routes::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE, ensure_role, redirect};

#[post("/transaction/add")]
pub async fn add_transaction(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddTransactionForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    let back = match form.job_id {
        Some(job_id) => format!("/job/{job_id}"),
        None => format!("/customer/{}", form.customer_id),
    };

    if let Err(e) = form.validate() {
        log::error!("Failed to validate form: {e}");
        FlashMessage::error("Form validation failed").send();
        return redirect(&back);
    }

    let new_transaction = match form.to_new_transaction() {
        Ok(transaction) => transaction,
        Err(e) => {
            log::error!("Failed to parse transaction form: {e}");
            FlashMessage::error(format!("Invalid transaction: {e}")).send();
            return redirect(&back);
        }
    };

    match repo.create_transaction(&new_transaction) {
        Ok(_) => {
            FlashMessage::success("Transaction recorded.".to_string()).send();
        }
        Err(e) => {
            log::error!("Failed to record transaction: {e}");
            FlashMessage::error("Failed to record transaction").send();
        }
    }
    redirect(&back)
}

#[post("/transaction/save")]
pub async fn save_transaction(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveTransactionForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    let back = format!("/customer/{}", form.customer_id);

    if let Err(e) = form.validate() {
        log::error!("Failed to validate form: {e}");
        FlashMessage::error("Form validation failed").send();
        return redirect(&back);
    }

    let updates = match form.to_update_transaction() {
        Ok(updates) => updates,
        Err(e) => {
            log::error!("Failed to parse transaction form: {e}");
            FlashMessage::error(format!("Invalid transaction: {e}")).send();
            return redirect(&back);
        }
    };

    match repo.update_transaction(form.id, &updates) {
        Ok(_) => {
            FlashMessage::success("Transaction updated.".to_string()).send();
        }
        Err(e) => {
            log::error!("Failed to update transaction: {e}");
            FlashMessage::error("Failed to update transaction").send();
        }
    }
    redirect(&back)
}

#[derive(Deserialize)]
struct DeleteTransactionForm {
    id: i32,
    customer_id: i32,
}

#[post("/transaction/delete")]
pub async fn delete_transaction(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteTransactionForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    match repo.delete_transaction(form.id) {
        Ok(()) => {
            FlashMessage::success("Transaction deleted.".to_string()).send();
        }
        Err(e) => {
            log::error!("Failed to delete transaction: {e}");
            FlashMessage::error("Failed to delete transaction").send();
        }
    }
    redirect(&format!("/customer/{}", form.customer_id))
}
