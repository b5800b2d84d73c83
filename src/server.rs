use std::{fs, io};

use actix_cors::Cors;
use actix_web::{
    http::header,
    web::{self, resource, Json, Path, Query},
    App, HttpRequest, HttpResponse, HttpServer,
};
use uuid::Uuid;

use crate::{
    core::{
        contact::{ContactForm, ContactMessage, ContactRelay, HttpRelay, SubmitStatus},
        settings::Settings,
    },
    error::FolioError,
    site::Site,
    views::{self, BlogQuery, ContactOutcomeView, FormView, GalleryQuery, ProjectsQuery},
};

pub async fn start_server(settings: Settings, site: Site) -> io::Result<()> {
    let addr = settings.socket_addr();
    let site = web::Data::new(site);
    let endpoint = settings.contact_endpoint.value;
    tracing::info!("Server started at {}", addr);
    HttpServer::new(move || {
        App::new()
            .app_data(site.clone())
            .app_data(web::Data::new(HttpRelay::new(endpoint.clone())))
            .configure(routes::<HttpRelay>)
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_header()
                    .allow_any_method(),
            )
    })
    .bind(addr)?
    .run()
    .await
}

/// Registers every page route. `R` delivers contact-form messages.
pub fn routes<R: ContactRelay + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|error, req| {
        tracing::debug!("Rejected query on {}: {}", req.path(), error);
        FolioError::BadRequest(error.to_string()).into()
    }))
    .app_data(web::JsonConfig::default().error_handler(|error, req| {
        tracing::debug!("Rejected body on {}: {}", req.path(), error);
        FolioError::BadRequest(error.to_string()).into()
    }))
    .service(resource("/").route(web::get().to(home_handler)))
        .service(resource("/about").route(web::get().to(about_handler)))
        .service(resource("/services").route(web::get().to(services_handler)))
        .service(resource("/projects").route(web::get().to(projects_handler)))
        .service(resource("/projects/{slug}").route(web::get().to(project_handler)))
        .service(resource("/blog").route(web::get().to(blog_handler)))
        .service(resource("/blog/{slug}").route(web::get().to(article_handler)))
        .service(
            resource("/contact")
                .route(web::get().to(contact_page_handler))
                .route(web::post().to(contact_handler::<R>)),
        )
        .service(resource("/resume").route(web::get().to(resume_handler)))
        .service(resource("/status").route(web::get().to(status_handler)));
}

async fn home_handler(req: HttpRequest, site: web::Data<Site>) -> HttpResponse {
    HttpResponse::Ok().json(views::home(&site, req.path()))
}

async fn about_handler(req: HttpRequest, site: web::Data<Site>) -> HttpResponse {
    HttpResponse::Ok().json(views::about(&site, req.path()))
}

async fn services_handler(req: HttpRequest, site: web::Data<Site>) -> HttpResponse {
    HttpResponse::Ok().json(views::services(&site, req.path()))
}

async fn projects_handler(
    req: HttpRequest,
    site: web::Data<Site>,
    query: Query<ProjectsQuery>,
) -> HttpResponse {
    HttpResponse::Ok().json(views::projects(&site, req.path(), &query))
}

async fn project_handler(
    req: HttpRequest,
    site: web::Data<Site>,
    slug: Path<String>,
    query: Query<GalleryQuery>,
) -> Result<HttpResponse, FolioError> {
    match views::project_detail(&site, req.path(), &slug, &query) {
        Ok(view) => Ok(HttpResponse::Ok().json(view)),
        Err(error) => {
            tracing::info!("Project lookup failed: {}", error);
            Err(error)
        }
    }
}

async fn blog_handler(
    req: HttpRequest,
    site: web::Data<Site>,
    query: Query<BlogQuery>,
) -> HttpResponse {
    HttpResponse::Ok().json(views::blog(&site, req.path(), &query))
}

async fn article_handler(
    req: HttpRequest,
    site: web::Data<Site>,
    slug: Path<String>,
) -> HttpResponse {
    let view = views::article(&site, req.path(), &slug);
    if view.fallback {
        tracing::debug!("Unknown article \"{}\", serving {}", slug, view.article.slug);
    }
    HttpResponse::Ok().json(view)
}

async fn contact_page_handler(req: HttpRequest, site: web::Data<Site>) -> HttpResponse {
    HttpResponse::Ok().json(views::contact(&site, req.path()))
}

async fn contact_handler<R: ContactRelay + 'static>(
    message: Json<ContactMessage>,
    relay: web::Data<R>,
) -> Result<HttpResponse, FolioError> {
    let submission_id = Uuid::new_v4();
    let mut form = ContactForm::with_fields(message.into_inner());
    if let Err(error) = form.submit(relay.get_ref()).await {
        tracing::warn!("Rejected contact submission {}: {}", submission_id, error);
        return Err(error);
    }

    let view = ContactOutcomeView {
        submission_id,
        form: FormView::from(&form),
    };
    if form.status() == SubmitStatus::Sent {
        tracing::info!("Relayed contact submission {}", submission_id);
        Ok(HttpResponse::Ok().json(view))
    } else {
        tracing::error!("Failed to relay contact submission {}", submission_id);
        Ok(HttpResponse::BadGateway().json(view))
    }
}

async fn resume_handler(site: web::Data<Site>) -> Result<HttpResponse, FolioError> {
    let path = &site.resume_path;
    let bytes = fs::read(path).map_err(|error| {
        tracing::error!("Could not read resume at {}: {}", path.display(), error);
        FolioError::ResumeUnavailable(error.to_string())
    })?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("resume.pdf");
    let content_type = match path.extension().and_then(|ext| ext.to_str()) {
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    };
    Ok(HttpResponse::Ok()
        .content_type(content_type)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(bytes))
}

async fn status_handler() -> HttpResponse {
    HttpResponse::Ok().body("folio is running")
}
