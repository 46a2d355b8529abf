//! The same operations give the same observable results on every backend.

mod support;

use bytes::Bytes;
use media_store::SaveOptions;
use support::{backends, metadata};

#[tokio::test]
async fn test_save_fetch_overwrite() {
    let (_temp, stores) = backends().await;
    for (name, store) in stores {
        let key = "personas/Alice/Profile.json";
        let options = SaveOptions::default()
            .with_content_type("application/json")
            .with_metadata(metadata(&[("certification", "EdSig kp=a,sig=b")]));
        store.save_media(key, r#"{"v":1}"#, options).await.unwrap();
        store
            .save_media(
                key,
                r#"{"v":2}"#,
                SaveOptions::default().with_content_type("text/plain"),
            )
            .await
            .unwrap();

        let media = store.fetch_media(key).await.unwrap();
        assert_eq!(media.body, Bytes::from(r#"{"v":2}"#), "{name}");
        assert_eq!(media.content_type.as_deref(), Some("text/plain"), "{name}");
        assert_eq!(media.metadata, None, "{name}");
    }
}

#[tokio::test]
async fn test_keys_are_case_sensitive() {
    let (_temp, stores) = backends().await;
    for (name, store) in stores {
        store
            .save_media("Readme", "upper", SaveOptions::default())
            .await
            .unwrap();
        store
            .save_media("readme", "lower", SaveOptions::default())
            .await
            .unwrap();

        assert_eq!(
            store.fetch_media("Readme").await.unwrap().body,
            Bytes::from("upper"),
            "{name}"
        );
        assert_eq!(
            store.fetch_media("readme").await.unwrap().body,
            Bytes::from("lower"),
            "{name}"
        );
    }
}

#[tokio::test]
async fn test_list_immediate_children() {
    let (_temp, stores) = backends().await;
    for (name, store) in stores {
        for key in ["personas/alice/a.txt", "personas/alice/B.txt"] {
            store
                .save_media(key, "x", SaveOptions::default())
                .await
                .unwrap();
        }

        let listed = store.list_media("personas/alice/").await.unwrap();
        assert_eq!(
            listed,
            vec!["personas/alice/B.txt", "personas/alice/a.txt"],
            "{name}"
        );
        assert!(store.list_media("personas/bob/").await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_bulk_delete() {
    let (_temp, stores) = backends().await;
    for (name, store) in stores {
        for key in ["personas/alice/a", "personas/alice/b", "personas/alice/c"] {
            store
                .save_media(key, "x", SaveOptions::default())
                .await
                .unwrap();
        }

        store.delete_media(Vec::<String>::new()).await.unwrap();
        store.delete_media(["missing-key"]).await.unwrap();
        store
            .delete_media(["personas/alice/a", "personas/alice/b", "missing-key"])
            .await
            .unwrap();

        assert!(store
            .fetch_media("personas/alice/a")
            .await
            .unwrap_err()
            .is_not_found());
        assert_eq!(
            store.list_media("personas/alice/").await.unwrap(),
            vec!["personas/alice/c"],
            "{name}"
        );
    }
}

#[tokio::test]
async fn test_delete_with_invalid_key_leaves_everything() {
    let (_temp, stores) = backends().await;
    for (name, store) in stores {
        store
            .save_media("a", "kept", SaveOptions::default())
            .await
            .unwrap();

        assert!(store.delete_media(["a", "a//b"]).await.is_err(), "{name}");
        assert_eq!(
            store.fetch_media("a").await.unwrap().body,
            Bytes::from("kept"),
            "{name}"
        );
    }
}
