use crate::api::customer::SaveCustomer;
use crate::model::customer::Customer;
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Customers API",
        version = "1.0.0",
        description = r#"
## Customers

CRUD and block/unblock operations over the customers table.

### Security
Every `/customers` route requires **HTTP Basic** credentials of a manager.
Credentials are checked on every request; there are no sessions or tokens.

### Response Format
- Single customers and lists of customers as JSON
- Errors as a plain-text status reason (`Bad Request`, `Unauthorized`, `Not Found`, `Internal Server Error`)

The query-action routes (`/customers.getAll`, `/customers.save`, ...) are not
described here.
"#,
    ),
    paths(
        crate::api::customer::list_customers,
        crate::api::customer::list_active_customers,
        crate::api::customer::get_customer,
        crate::api::customer::save_customer,
        crate::api::customer::remove_customer,
        crate::api::customer::block_customer,
        crate::api::customer::unblock_customer
    ),
    components(
        schemas(
            Customer,
            SaveCustomer
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Customers", description = "Customer management APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "basic_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
        );
    }
}
