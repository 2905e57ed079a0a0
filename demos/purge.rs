use edgio::api::purge::{Purge, PurgeRequest};
use edgio::{ApiScope, EdgioApi};

fn main() {
    let mut edgio = EdgioApi::from_env_values();
    edgio
        .authenticate(ApiScope::CachePurge)
        .expect("Failed to authenticate");

    let environment_id =
        std::env::var("EDGIO_ENVIRONMENT_ID").expect("EDGIO_ENVIRONMENT_ID must be set");

    let purge = Purge::new(&edgio);
    let submitted = purge
        .submit(&PurgeRequest {
            environment_id,
            purge_type: "all_entries".to_string(),
            values: vec![],
            hostname: None,
        })
        .expect("Failed to submit purge");
    println!("submitted: {:?}", submitted);

    let status = purge.status(&submitted.id).expect("Failed to poll purge");
    println!(
        "purge {}: {} ({}%)",
        status.id, status.status, status.progress_percentage
    );
}
