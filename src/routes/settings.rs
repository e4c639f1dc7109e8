use std::path::Path;

use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;
use uuid::Uuid;
use validator::Validate;

use crate::forms::company::{SaveCompanyForm, UploadLogoForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::{CompanyReader, CompanyWriter, DieselRepository};
use crate::routes::{
    SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE, base_context, ensure_role, redirect, render_template,
};

#[get("/settings")]
pub async fn show_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    let profile = match repo.get_company_profile() {
        Ok(profile) => profile,
        Err(e) => {
            log::error!("Failed to get company profile: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "settings",
        &server_config.auth_service_url,
    );
    if let Some(profile) = &profile {
        context.insert("company", profile);
    }

    render_template(&tera, "settings/index.html", &context)
}

#[post("/settings/company")]
pub async fn save_company(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: String,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    // The working-hours rows repeat their field names, which `web::Form`
    // cannot deserialize into Vec fields.
    let form: SaveCompanyForm = match serde_html_form::from_str(&body) {
        Ok(form) => form,
        Err(e) => {
            log::error!("Failed to parse company form: {e}");
            FlashMessage::error("Form validation failed").send();
            return redirect("/settings");
        }
    };

    if let Err(e) = form.validate() {
        log::error!("Failed to validate form: {e}");
        FlashMessage::error("Form validation failed").send();
        return redirect("/settings");
    }

    let profile = match form.to_new_company_profile() {
        Ok(profile) => profile,
        Err(e) => {
            log::error!("Failed to build company profile: {e}");
            FlashMessage::error("Invalid working hours").send();
            return redirect("/settings");
        }
    };

    match repo.upsert_company_profile(&profile) {
        Ok(_) => {
            FlashMessage::success("Company profile saved.".to_string()).send();
        }
        Err(e) => {
            log::error!("Failed to save company profile: {e}");
            FlashMessage::error("Failed to save company profile").send();
        }
    }
    redirect("/settings")
}

#[post("/settings/logo")]
pub async fn upload_logo(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    MultipartForm(form): MultipartForm<UploadLogoForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    let extension = form
        .logo
        .file_name
        .as_deref()
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .unwrap_or("png")
        .to_lowercase();

    let file_name = format!("{}.{extension}", Uuid::new_v4());
    let target = Path::new(&server_config.upload_dir).join(&file_name);

    if let Err(e) = std::fs::create_dir_all(&server_config.upload_dir) {
        log::error!("Failed to create upload dir: {e}");
        FlashMessage::error("Failed to upload logo").send();
        return redirect("/settings");
    }
    if let Err(e) = std::fs::copy(form.logo.file.path(), &target) {
        log::error!("Failed to store logo: {e}");
        FlashMessage::error("Failed to upload logo").send();
        return redirect("/settings");
    }

    let previous = match repo.get_company_profile() {
        Ok(profile) => profile.and_then(|p| p.logo_url),
        Err(e) => {
            log::error!("Failed to get company profile: {e}");
            None
        }
    };

    let logo_url = format!("/uploads/{file_name}");
    match repo.update_company_logo(Some(&logo_url)) {
        Ok(_) => {
            // Old file removal is best-effort; a leftover is harmless.
            if let Some(previous) = previous
                && let Some(name) = previous.strip_prefix("/uploads/")
            {
                let old = Path::new(&server_config.upload_dir).join(name);
                if let Err(e) = std::fs::remove_file(old) {
                    log::warn!("Failed to remove previous logo: {e}");
                }
            }
            FlashMessage::success("Logo updated.".to_string()).send();
        }
        Err(e) => {
            log::error!("Failed to update logo: {e}");
            FlashMessage::error("Save the company profile before uploading a logo").send();
        }
    }
    redirect("/settings")
}
