//! Reference authors and books. The initial migration inserts the same rows.

use bookshelf_model::{Author, AuthorID, Book, BookID};
use uuid::Uuid;

pub const GEORGE_RR_MARTIN: AuthorID =
    AuthorID(Uuid::from_u128(0xd28888e9_2ba9_473a_a40f_e38cb54f9b35));
pub const STEPHEN_FRY: AuthorID =
    AuthorID(Uuid::from_u128(0xda2fd609_d754_4feb_8acd_c4f9ff13ba96));
pub const JAMES_ELROY: AuthorID =
    AuthorID(Uuid::from_u128(0x24810dfc_2d94_4cc7_aab5_cdf98b83f0c9));
pub const DOUGLAS_ADAMS: AuthorID =
    AuthorID(Uuid::from_u128(0x2902b665_1190_4c70_9915_b9c2d7680450));

pub const A_GAME_OF_THRONES: BookID =
    BookID(Uuid::from_u128(0x5b1c2b4d_48c7_402a_80c3_cc796ad49c6b));
pub const THE_WINDS_OF_WINTER: BookID =
    BookID(Uuid::from_u128(0xd8663e5e_7494_4f81_8739_6e0de1bea7ee));
pub const MYTHOS: BookID =
    BookID(Uuid::from_u128(0xd173e20d_159e_4127_9ce9_b0ac2564ad97));
pub const AMERICAN_TABLOID: BookID =
    BookID(Uuid::from_u128(0x40ff5488_fdab_45b5_bc3a_14302d59869a));
pub const HITCHHIKERS_GUIDE: BookID =
    BookID(Uuid::from_u128(0x25320c5e_f58a_4b1f_b63a_8ee07a840bdf));

fn author(id: AuthorID, first_name: &str, last_name: &str) -> Author {
    Author {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    }
}

fn martin() -> Author {
    author(GEORGE_RR_MARTIN, "George", "RR Martin")
}

fn fry() -> Author {
    author(STEPHEN_FRY, "Stephen", "Fry")
}

fn elroy() -> Author {
    author(JAMES_ELROY, "James", "Elroy")
}

fn adams() -> Author {
    author(DOUGLAS_ADAMS, "Douglas", "Adams")
}

pub fn authors() -> Vec<Author> {
    vec![martin(), fry(), elroy(), adams()]
}

pub fn books() -> Vec<Book> {
    [
        (
            A_GAME_OF_THRONES,
            martin(),
            "A Game of Thrones",
            "A Game of Thrones is the first novel in A Song of Ice and Fire, a series of fantasy novels by American author George R. R. Martin.",
        ),
        (
            THE_WINDS_OF_WINTER,
            martin(),
            "The Winds of Winter",
            "Forthcoming 6th novel in A Song of Ice and Fire.",
        ),
        (
            MYTHOS,
            fry(),
            "Mythos",
            "The Greek myths are amongst the best stories ever told, passed down through millennia and inspiring writers and artists as varied as Shakespeare, Michelangelo, James Joyce and Walt Disney.",
        ),
        (
            AMERICAN_TABLOID,
            elroy(),
            "American Tabloid",
            "American Tabloid is a 1995 novel by James Ellroy that chronicles the events surrounding three rogue American law enforcement officers from November 22, 1958 through November 22, 1963.",
        ),
        (
            HITCHHIKERS_GUIDE,
            adams(),
            "The Hitchhiker's Guide to the Galaxy",
            "In The Hitchhiker's Guide to the Galaxy, the characters visit the legendary planet Magrathea, home to the now-collapsed planet-building industry, and meet Slartibartfast, a planetary coastline designer.",
        ),
    ]
    .into_iter()
    .map(|(id, author, title, description)| Book {
        id,
        author,
        title: title.to_string(),
        description: Some(description.to_string()),
    })
    .collect()
}
