use httpmock::prelude::*;
use serde_json::json;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

use deckfetch::download::{run_download, DownloadOptions};
use deckfetch::scryfall::client::ScryfallClient;
use deckfetch::scryfall::ImageSize;
use deckfetch::translate::{run_translate, TranslateOptions};
use deckfetch::Error;

fn test_client(server: &MockServer) -> ScryfallClient {
    ScryfallClient::with_base_url(&server.base_url(), Duration::ZERO)
}

#[tokio::test]
async fn download_flow_end_to_end() {
    let server = MockServer::start();
    let tmp = TempDir::new().unwrap();
    let out_dir = tmp.path().join("imgs");

    let input = tmp.path().join("deck.txt");
    fs::write(
        &input,
        "# my deck\n\
         1 Krenko, Mob Boss # !Commander\n\
         2 Missing Card\n\
         1 Artless\n\
         1 Delver of Secrets//Insectile Aberration\n\
         Krenko, Mob Boss\n",
    )
    .unwrap();

    let krenko = server.mock(|when, then| {
        when.method(GET)
            .path("/cards/named")
            .query_param("exact", "Krenko, Mob Boss");
        then.status(200).json_body(json!({
            "object": "card",
            "name": "Krenko, Mob Boss",
            "printed_name": "Krenko, jefe de la turba",
            "lang": "es",
            "set": "m13",
            "collector_number": "61",
            "image_uris": { "normal": server.url("/img/krenko.jpg") }
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/cards/named")
            .query_param("exact", "Artless");
        then.status(200).json_body(json!({
            "object": "card",
            "name": "Artless",
            "lang": "en",
            "set": "abc",
            "collector_number": "1"
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/cards/named")
            .query_param("exact", "Delver of Secrets // Insectile Aberration");
        then.status(200).json_body(json!({
            "object": "card",
            "name": "Delver of Secrets // Insectile Aberration",
            "lang": "en",
            "set": "isd",
            "collector_number": "51",
            "card_faces": [
                { "name": "Delver of Secrets" },
                {
                    "name": "Insectile Aberration",
                    "image_uris": { "png": server.url("/img/delver-back.png") }
                }
            ]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/img/krenko.jpg");
        then.status(200).body("fake-jpg-bytes");
    });
    server.mock(|when, then| {
        when.method(GET).path("/img/delver-back.png");
        then.status(200).body("fake-png-bytes");
    });

    let client = test_client(&server);
    let opts = DownloadOptions {
        input,
        out_dir: out_dir.clone(),
        size: ImageSize::Normal,
        lang: Some("es".to_string()),
        csv_name: "resumen.csv".to_string(),
    };
    run_download(&client, &opts).await.unwrap();

    // the duplicate Krenko line was deduplicated before resolution
    krenko.assert_hits(1);

    let krenko_path = out_dir.join("krenko_jefe_de_la_turba_es_m1361.jpg");
    assert_eq!(fs::read(&krenko_path).unwrap(), b"fake-jpg-bytes");

    // only the second face carries artwork, so only the -2 file exists
    assert!(out_dir
        .join("delver_of_secrets_insectile_aberration_en_isd51-2.png")
        .exists());
    assert!(!out_dir
        .join("delver_of_secrets_insectile_aberration_en_isd51-1.png")
        .exists());

    let csv = fs::read_to_string(out_dir.join("resumen.csv")).unwrap();
    assert!(csv.starts_with("Nombre original,"));
    assert!(csv.contains("exact=Krenko, Mob Boss&lang=es"));
    assert!(csv.contains("NO_ENCONTRADA"));
    assert!(csv.contains("SIN_IMAGEN"));
    assert!(csv.contains("krenko_jefe_de_la_turba_es_m1361.jpg"));

    // a second run overwrites the same deterministic file names
    run_download(&client, &opts).await.unwrap();
    let entries = fs::read_dir(&out_dir).unwrap().count();
    assert_eq!(entries, 3); // two images + the CSV
}

#[tokio::test]
async fn translate_flow_uses_identity_search_when_no_localized_named_match() {
    let server = MockServer::start();
    let tmp = TempDir::new().unwrap();

    let input = tmp.path().join("deck.txt");
    fs::write(&input, "1 Opt\n1 Nonexistent Card\n").unwrap();

    // English card for both the lang-constrained and the unconstrained
    // exact lookup; the es print only exists through the search endpoint.
    let exact_opt = server.mock(|when, then| {
        when.method(GET)
            .path("/cards/named")
            .query_param("exact", "Opt");
        then.status(200).json_body(json!({
            "object": "card",
            "name": "Opt",
            "lang": "en",
            "set": "xln",
            "collector_number": "65",
            "oracle_id": "aaaa-bbbb"
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/cards/search")
            .query_param("q", "oracleid:aaaa-bbbb lang:es");
        then.status(200).json_body(json!({
            "object": "list",
            "data": [{
                "object": "card",
                "name": "Opt",
                "printed_name": "Opción",
                "lang": "es",
                "set": "xln",
                "collector_number": "65",
                "scryfall_uri": "https://scryfall.com/card/xln/65/es"
            }]
        }));
    });

    let out = tmp.path().join("traducciones.csv");
    let deck_out = tmp.path().join("deck_es.txt");
    let client = test_client(&server);
    run_translate(
        &client,
        &TranslateOptions {
            input,
            out: out.clone(),
            lang: "es".to_string(),
            deck_out: Some(deck_out.clone()),
        },
    )
    .await
    .unwrap();

    // hit once by the rejected lang-constrained lookup, once unconstrained
    exact_opt.assert_hits(2);

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("original_name,spanish_name,found,"));
    assert!(csv.contains("Opt,Opción,yes,xln,65,es,https://scryfall.com/card/xln/65/es"));
    assert!(csv.contains("Nonexistent Card,,no,,,,"));

    // unresolved names fall back to their original text in the deck output
    let deck = fs::read_to_string(&deck_out).unwrap();
    assert_eq!(deck, "Opción\nNonexistent Card\n");
}

#[tokio::test]
async fn translate_flow_accepts_localized_named_match() {
    let server = MockServer::start();
    let tmp = TempDir::new().unwrap();

    let input = tmp.path().join("deck.txt");
    fs::write(&input, "1 Shock\n").unwrap();

    server.mock(|when, then| {
        when.method(GET)
            .path("/cards/named")
            .query_param("exact", "Shock")
            .query_param("lang", "es");
        then.status(200).json_body(json!({
            "object": "card",
            "name": "Shock",
            "printed_name": "Choque",
            "lang": "es",
            "set": "m21",
            "collector_number": "159"
        }));
    });
    let search = server.mock(|when, then| {
        when.method(GET).path("/cards/search");
        then.status(404);
    });

    let out = tmp.path().join("out.csv");
    let client = test_client(&server);
    run_translate(
        &client,
        &TranslateOptions {
            input,
            out: out.clone(),
            lang: "es".to_string(),
            deck_out: None,
        },
    )
    .await
    .unwrap();

    search.assert_hits(0);
    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.contains("Shock,Choque,yes,m21,159,es,"));
}

#[tokio::test]
async fn empty_deck_list_is_fatal() {
    let server = MockServer::start();
    let tmp = TempDir::new().unwrap();

    let input = tmp.path().join("deck.txt");
    fs::write(&input, "# only comments\n\n").unwrap();

    let client = test_client(&server);
    let err = run_download(
        &client,
        &DownloadOptions {
            input,
            out_dir: tmp.path().join("imgs"),
            size: ImageSize::Normal,
            lang: Some("es".to_string()),
            csv_name: "resumen.csv".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::EmptyDeckList));
}
