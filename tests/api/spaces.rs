use crate::helpers;

#[tokio::test]
async fn spaces_page_is_titled_spaces_makersbnb() {
    let app = helpers::spawn_app().await;

    let response = app.get_spaces().await;
    assert_eq!(response.status().as_u16(), 200);

    let html = response.text().await.unwrap();
    assert!(html.contains("<title>Spaces - MakersBnB</title>"));
}
