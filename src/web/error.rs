//! HTML error pages rendered in place of bare framework error bodies.

use actix_web::body::{BoxBody, EitherBody, MessageBody};
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::Result;
use askama_actix::Template;

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub site_name: String,
    pub status: u16,
    pub title: &'a str,
}

pub fn render_400<B: MessageBody + 'static>(
    res: ServiceResponse<B>,
) -> Result<ErrorHandlerResponse<B>> {
    render_error(res, "Bad Request")
}

pub fn render_404<B: MessageBody + 'static>(
    res: ServiceResponse<B>,
) -> Result<ErrorHandlerResponse<B>> {
    render_error(res, "Not Found")
}

pub fn render_500<B: MessageBody + 'static>(
    res: ServiceResponse<B>,
) -> Result<ErrorHandlerResponse<B>> {
    render_error(res, "Internal Server Error")
}

fn render_error<B: MessageBody + 'static>(
    res: ServiceResponse<B>,
    title: &str,
) -> Result<ErrorHandlerResponse<B>> {
    let status = res.status();
    let body = ErrorTemplate {
        site_name: crate::app_config::site().name,
        status: status.as_u16(),
        title,
    }
    .render()
    .unwrap_or_else(|e| {
        log::error!("Failed to render error page: {}", e);
        title.to_owned()
    });

    let (req, res) = res.into_parts();
    let mut res = res.set_body(body);
    res.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/html; charset=utf-8"),
    );

    let res: ServiceResponse<EitherBody<B, BoxBody>> = ServiceResponse::new(req, res)
        .map_into_boxed_body()
        .map_into_right_body();

    Ok(ErrorHandlerResponse::Response(res))
}
