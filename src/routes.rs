use crate::{
    api::{
        common::{form_config, json_config, query_config},
        customer, customer_action,
    },
    auth::middleware::basic_auth,
    config::RouterVariant,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, variant: RouterVariant) {
    cfg.app_data(json_config())
        .app_data(form_config())
        .app_data(query_config());

    // Action routes go first so `/customers.<action>` never falls into the
    // `/customers` scope.
    if variant.serves_action_routes() {
        cfg.route("/customers.getAll", web::get().to(customer_action::get_all))
            .route(
                "/customers.getAllActive",
                web::get().to(customer_action::get_all_active),
            )
            .route("/customers.getById", web::get().to(customer_action::get_by_id))
            .route("/customers.save", web::post().to(customer_action::save))
            .route(
                "/customers.removeById",
                web::get().to(customer_action::remove_by_id),
            )
            .route(
                "/customers.blockById",
                web::get().to(customer_action::block_by_id),
            )
            .route(
                "/customers.unblockById",
                web::get().to(customer_action::unblock_by_id),
            );
    }

    if variant.serves_resource_routes() {
        cfg.service(
            web::scope("/customers")
                .wrap(from_fn(basic_auth))
                // /customers
                .service(
                    web::resource("")
                        .route(web::get().to(customer::list_customers))
                        .route(web::post().to(customer::save_customer)),
                )
                // /customers/active, registered before /{id}
                .service(
                    web::resource("/active").route(web::get().to(customer::list_active_customers)),
                )
                // /customers/{id}
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(customer::get_customer))
                        .route(web::delete().to(customer::remove_customer)),
                )
                // /customers/{id}/block
                .service(
                    web::resource("/{id}/block")
                        .route(web::post().to(customer::block_customer))
                        .route(web::delete().to(customer::unblock_customer)),
                ),
        );
    }
}
