use std::net::TcpListener;

use actix_web::{
    dev::Server,
    middleware::Logger,
    web, App, HttpServer,
};

use crate::{
    configuration::Settings,
    routes::{default_route, extract_route},
};

pub fn run(listener: TcpListener, settings: Settings) -> Result<Server, std::io::Error> {
    let settings = web::Data::new(settings);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::health)
            .service(
                web::scope("/extract")
                    .service(extract_route::extract_url)
                    .service(extract_route::extract_markup)
                    .service(extract_route::extract_batch),
            )
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
