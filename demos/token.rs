use edgio::{ApiScope, EdgioApi};

fn main() {
    let client_id = std::env::var("EDGIO_CLIENT_ID").expect("EDGIO_CLIENT_ID must be set");
    let client_secret =
        std::env::var("EDGIO_CLIENT_SECRET").expect("EDGIO_CLIENT_SECRET must be set");
    let mut edgio = EdgioApi::new(client_id, client_secret);
    println!("edgio: {:?}", edgio);

    edgio
        .authenticate(ApiScope::Accounts)
        .expect("Failed to authenticate");

    let token = edgio
        .get_token(ApiScope::Accounts)
        .expect("No token cached");
    println!("token: {:?}", token);
}
