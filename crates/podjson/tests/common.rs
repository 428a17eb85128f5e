#![allow(missing_docs, dead_code)]
#![allow(clippy::needless_raw_string_hashes)]

/// A stream listing as the pod returns it, one post with its author and
/// interactions.
pub const STREAM_PAGE: &str = r#"[
    {
        "id": 4031,
        "guid": "a6b1e9c0f4a10136f7f11e1f5c2d7a9b",
        "created_at": "2024-05-02T09:14:33.000Z",
        "post_type": "StatusMessage",
        "title": "Hello \/ world",
        "text": "Hello from the pod!\nSecond line with \"quotes\" and é.",
        "public": true,
        "nsfw": false,
        "provider_display_name": null,
        "author": {
            "id": 12,
            "guid": "f0e1d2c3b4a59687",
            "name": "Alice Example",
            "diaspora_id": "alice@pod.example",
            "avatar": {
                "small": "https://pod.example/a/s.png",
                "medium": "https://pod.example/a/m.png",
                "large": "https://pod.example/a/l.png"
            }
        },
        "interactions": {
            "likes": [
                {"id": 77, "guid": "l1", "author": {"id": 5, "name": "Bob"}}
            ],
            "reshares": [],
            "comments_count": 3,
            "likes_count": 1,
            "reshares_count": 0
        },
        "mentioned_people": [],
        "photos": [],
        "root": null,
        "location": null,
        "poll": null
    }
]"#;

/// The response headers and body of a request for that page, as the socket
/// delivers them.
pub const HTTP_RESPONSE: &[&str] = &[
    "HTTP/1.1 200 OK\r\nServer: nginx\r\nStatus: 200 OK\r\n",
    "Content-Type: application/json; charset=utf-8\r\n\r\n",
    r#"[{"conversation":{"id":9,"subject":"Lunch?","read":false,"#,
    r#""participants":[{"id":12,"name":"Alice"},{"id":5,"name":"Bob"}]}}]"#,
    "\n",
];

/// The inline script on a logged-in page.
pub const PROFILE_PAGE: &str = concat!(
    "<!DOCTYPE html><html><head><script>",
    r#"window.gon={};gon.appConfig={"settings":{"podname":"example"}};"#,
    r#"window.current_user_attributes = {"id":12,"guid":"f0e1d2c3b4a59687","name":"Alice Example","notifications_count":4,"unread_messages_count":1};"#,
    "</script><div class=\"x\">{not json}</div></head></html>",
);
