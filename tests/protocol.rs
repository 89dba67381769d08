//! Wire codec and command parsing.

use lane_duel_server::{
    game::{
        snapshot::{Snapshot, UnitView},
        types::DeployOrder,
    },
    protocol::{decode, encode, ClientMsg, CommandErr, ServerMsg},
};

#[test]
fn encode_then_decode_returns_the_pair() {
    let cases = [
        ("READY", ""),
        ("SELECT", "0,1,2,3"),
        ("DEPLOY", "1:4,0,2"),
        ("UPDATE", "5|5|0|0|0,1,5,1,225;"),
        ("INFO", "hello there"),
    ];
    for (kind, payload) in cases {
        assert_eq!(decode(&encode(kind, payload)), (kind, payload));
    }
}

#[test]
fn decode_trims_both_fields() {
    assert_eq!(decode("  DEPLOY :  0,1,2 \r\n"), ("DEPLOY", "0,1,2"));
}

#[test]
fn select_skips_garbage_tokens() {
    assert_eq!(ClientMsg::parse("SELECT", "3,x,,5"), Ok(ClientMsg::Select(vec![3, 5])));
    assert_eq!(ClientMsg::parse("SELECT", ""), Ok(ClientMsg::Select(vec![])));
}

#[test]
fn deploy_needs_exactly_three_integers() {
    assert_eq!(
        ClientMsg::parse("DEPLOY", "2, 4 ,0"),
        Ok(ClientMsg::Deploy(DeployOrder {
            card_id: 2,
            local_row: 4,
            col: 0
        }))
    );
    for bad in ["", "1,2", "1,2,3,4", "a,1,1", "1,-1,0"] {
        assert!(
            matches!(ClientMsg::parse("DEPLOY", bad), Err(CommandErr::Malformed { .. })),
            "{bad:?} should be malformed"
        );
    }
}

#[test]
fn unknown_types_are_reported() {
    assert_eq!(ClientMsg::parse("HELLO", "x"), Err(CommandErr::Unknown("HELLO".into())));
    // Server-only types are not commands.
    assert!(ClientMsg::parse("UPDATE", "").is_err());
}

#[test]
fn server_lines_carry_origin_seat() {
    assert_eq!(ServerMsg::Assign(1).to_line(), "ASSIGN:1\n");
    assert_eq!(ServerMsg::Ready(0).to_line(), "READY:0\n");
    assert_eq!(ServerMsg::NotReady(1).to_line(), "NOTREADY:1\n");
    assert_eq!(ServerMsg::StartGame.to_line(), "START_GAME:\n");
    assert_eq!(
        ServerMsg::Select {
            seat: 1,
            cards: vec![0, 4, 4, 7]
        }
        .to_line(),
        "SELECT:1:0,4,4,7\n"
    );
    assert_eq!(
        ServerMsg::Deploy {
            seat: 0,
            order: DeployOrder {
                card_id: 0,
                local_row: 0,
                col: 1
            }
        }
        .to_line(),
        "DEPLOY:0:0,0,1\n"
    );
    assert_eq!(ServerMsg::End { tower_damage: [120, 0] }.to_line(), "END:120/0\n");
}

#[test]
fn update_payload_lists_every_unit() {
    let snap = Snapshot {
        elixir: [3, 10],
        tower_damage: [0, 60],
        units: vec![
            UnitView {
                owner: 0,
                card_id: 0,
                row: 4,
                col: 1,
                hp: 100,
            },
            UnitView {
                owner: 1,
                card_id: 7,
                row: 0,
                col: 2,
                hp: 630,
            },
        ],
    };

    assert_eq!(
        ServerMsg::Update(snap).to_line(),
        "UPDATE:3|10|0|60|0,0,4,1,100;1,7,0,2,630;\n"
    );
}
