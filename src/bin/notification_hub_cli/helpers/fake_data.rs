// ABOUTME: Random notification payloads for load generation and demos
// ABOUTME: Lorem-style titles and bodies, random order ids, optional fixed recipient
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use notification_hub::models::CreateNotificationRequest;
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "labore", "magna", "aliqua", "enim", "minim", "veniam",
    "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi", "aliquip", "commodo",
    "consequat", "duis", "aute", "irure", "voluptate", "velit", "esse", "cillum", "fugiat",
];

fn words<R: Rng>(rng: &mut R, count: usize) -> Vec<&'static str> {
    (0..count)
        .filter_map(|_| WORDS.choose(rng).copied())
        .collect()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn sentence<R: Rng>(rng: &mut R) -> String {
    let length = rng.gen_range(6..12);
    format!("{}.", capitalize(&words(rng, length).join(" ")))
}

/// Build one random notification, addressed to `user_id` or a fresh random user
pub fn fake_notification(user_id: Option<Uuid>) -> CreateNotificationRequest {
    let mut rng = rand::thread_rng();

    let title = capitalize(&words(&mut rng, 4).join(" "));
    let sentences = rng.gen_range(2..5);
    let content = (0..sentences)
        .map(|_| sentence(&mut rng))
        .collect::<Vec<_>>()
        .join(" ");

    CreateNotificationRequest {
        title,
        content,
        user_id: user_id.unwrap_or_else(Uuid::new_v4),
        order_id: rng.gen_range(0..=100),
    }
}
