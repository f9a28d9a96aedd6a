//! Integration tests for the Lucky Vault contracts.
//!
//! Every contract is driven through its `instantiate` / `execute` / `query`
//! entry points with `cosmwasm_std::testing` mocks. The prize distributor's
//! smart queries are routed to the draw buffer, prize config buffer and ticket
//! contracts with `MockQuerier::update_wasm`.
//!
//! Run:
//! ```bash
//! cargo test -p lucky-vault-integration-tests
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cosmwasm_std::testing::{
    message_info, mock_dependencies, mock_env, MockApi, MockQuerier, MockStorage,
};
use cosmwasm_std::{
    from_json, Addr, BankMsg, Binary, CosmosMsg, Env, OwnedDeps, Response, StdResult,
    SystemError, SystemResult, Timestamp, Uint128, Uint256, WasmQuery,
};
use lucky_prize_config_buffer::state::ConfigLookup;
use lucky_prize_distributor::msg::CalculatePrizesResponse;
use lucky_prize_distributor::ContractError as DistributorError;
use lucky_vault_common::calculator::{pick_random, user_seed, CalculatorError};
use lucky_vault_common::{Draw, PrizeConfig};

// ─── Constants ───

const T0: u64 = 1_700_000_000;
const DAY: u64 = 86_400;
const DENOM: &str = "uusdc";

type TestDeps = OwnedDeps<MockStorage, MockApi, MockQuerier>;

// ─── Helpers ───

fn env_at(seconds: u64) -> Env {
    let mut env = mock_env();
    env.block.time = Timestamp::from_seconds(seconds);
    env
}

fn addr(name: &str) -> Addr {
    MockApi::default().addr_make(name)
}

fn prize_config() -> PrizeConfig {
    PrizeConfig {
        match_cardinality: 2,
        bit_range_size: 8,
        distributions: vec![500_000_000, 300_000_000],
        max_picks_per_user: 10,
        number_of_picks: 4,
        prize: Uint128::new(1_000),
        start_offset: DAY,
        end_offset: 0,
    }
}

/// Draw `draw_id`, completed at `T0 + draw_id * DAY`.
fn draw(draw_id: u64, winning_random_number: Uint256) -> Draw {
    Draw {
        draw_id,
        winning_random_number,
        timestamp: T0 + draw_id * DAY,
        beacon_period_started_at: T0 + (draw_id - 1) * DAY,
        beacon_period_seconds: DAY as u32,
    }
}

/// Winning number matched in full by `user`'s `pick`.
fn won_by(user: &Addr, pick: u64) -> Uint256 {
    pick_random(&user_seed(user.as_str()), pick)
}

fn sent(res: &Response) -> Option<(String, Uint128)> {
    res.messages.iter().find_map(|sub| match &sub.msg {
        CosmosMsg::Bank(BankMsg::Send { to_address, amount }) => {
            Some((to_address.clone(), amount[0].amount))
        }
        _ => None,
    })
}

/// All four contracts, each with its own storage. The collaborator deps are
/// shared with the distributor's wasm query handler; `clock` is the block time
/// those queries observe.
struct Suite {
    draws: Rc<RefCell<TestDeps>>,
    prize_configs: Rc<RefCell<TestDeps>>,
    ticket: Rc<RefCell<TestDeps>>,
    distributor: TestDeps,
    clock: Rc<Cell<u64>>,
}

impl Suite {
    fn new(lookup: ConfigLookup) -> Self {
        let admin = addr("admin");
        let manager = addr("manager");

        let mut draws = mock_dependencies();
        lucky_draw_buffer::contract::instantiate(
            draws.as_mut(),
            mock_env(),
            message_info(&admin, &[]),
            lucky_draw_buffer::msg::InstantiateMsg {
                manager: manager.to_string(),
                capacity: None,
            },
        )
        .unwrap();

        let mut prize_configs = mock_dependencies();
        lucky_prize_config_buffer::contract::instantiate(
            prize_configs.as_mut(),
            mock_env(),
            message_info(&admin, &[]),
            lucky_prize_config_buffer::msg::InstantiateMsg {
                manager: manager.to_string(),
                capacity: None,
                lookup,
            },
        )
        .unwrap();

        let mut ticket = mock_dependencies();
        lucky_ticket::contract::instantiate(
            ticket.as_mut(),
            mock_env(),
            message_info(&admin, &[]),
            lucky_ticket::msg::InstantiateMsg {
                controller: addr("controller").to_string(),
                account_twab_capacity: None,
                supply_twab_capacity: None,
            },
        )
        .unwrap();

        let mut suite = Suite {
            draws: Rc::new(RefCell::new(draws)),
            prize_configs: Rc::new(RefCell::new(prize_configs)),
            ticket: Rc::new(RefCell::new(ticket)),
            distributor: mock_dependencies(),
            clock: Rc::new(Cell::new(T0)),
        };
        suite.route_queries();

        lucky_prize_distributor::contract::instantiate(
            suite.distributor.as_mut(),
            mock_env(),
            message_info(&admin, &[]),
            lucky_prize_distributor::msg::InstantiateMsg {
                draw_buffer: addr("draw_buffer").to_string(),
                prize_config_buffer: addr("prize_config_buffer").to_string(),
                ticket: addr("ticket").to_string(),
                prize_denom: DENOM.to_string(),
                claim_history_capacity: None,
                max_draws_per_claim: None,
            },
        )
        .unwrap();

        suite
    }

    fn route_queries(&mut self) {
        let draws = Rc::clone(&self.draws);
        let prize_configs = Rc::clone(&self.prize_configs);
        let ticket = Rc::clone(&self.ticket);
        let clock = Rc::clone(&self.clock);
        let draw_buffer = addr("draw_buffer").to_string();
        let prize_config_buffer = addr("prize_config_buffer").to_string();
        let ticket_addr = addr("ticket").to_string();

        self.distributor.querier.update_wasm(move |query| {
            let (contract_addr, msg) = match query {
                WasmQuery::Smart { contract_addr, msg } => (contract_addr, msg),
                _ => {
                    return SystemResult::Err(SystemError::InvalidRequest {
                        error: "Only smart queries supported".to_string(),
                        request: Default::default(),
                    })
                }
            };
            let env = env_at(clock.get());

            let result: StdResult<Binary> = if *contract_addr == draw_buffer {
                from_json(msg).and_then(|msg| {
                    lucky_draw_buffer::contract::query(draws.borrow().as_ref(), env, msg)
                })
            } else if *contract_addr == prize_config_buffer {
                from_json(msg).and_then(|msg| {
                    lucky_prize_config_buffer::contract::query(
                        prize_configs.borrow().as_ref(),
                        env,
                        msg,
                    )
                })
            } else if *contract_addr == ticket_addr {
                from_json(msg).and_then(|msg| {
                    lucky_ticket::contract::query(ticket.borrow().as_ref(), env, msg)
                })
            } else {
                return SystemResult::Err(SystemError::NoSuchContract {
                    addr: contract_addr.clone(),
                });
            };
            SystemResult::Ok(result.into())
        });
    }

    fn push_draw(&self, draw: Draw) {
        lucky_draw_buffer::contract::execute(
            self.draws.borrow_mut().as_mut(),
            env_at(self.clock.get()),
            message_info(&addr("manager"), &[]),
            lucky_draw_buffer::msg::ExecuteMsg::PushDraw { draw },
        )
        .unwrap();
    }

    fn push_prize_config(&self, draw_id: u64, prize_config: PrizeConfig) {
        lucky_prize_config_buffer::contract::execute(
            self.prize_configs.borrow_mut().as_mut(),
            env_at(self.clock.get()),
            message_info(&addr("manager"), &[]),
            lucky_prize_config_buffer::msg::ExecuteMsg::PushPrizeConfig {
                draw_id,
                prize_config,
            },
        )
        .unwrap();
    }

    fn mint(&self, recipient: &Addr, amount: u128) {
        lucky_ticket::contract::execute(
            self.ticket.borrow_mut().as_mut(),
            env_at(self.clock.get()),
            message_info(&addr("controller"), &[]),
            lucky_ticket::msg::ExecuteMsg::Mint {
                recipient: recipient.to_string(),
                amount: Uint128::new(amount),
            },
        )
        .unwrap();
    }

    fn transfer(&self, from: &Addr, to: &Addr, amount: u128) {
        lucky_ticket::contract::execute(
            self.ticket.borrow_mut().as_mut(),
            env_at(self.clock.get()),
            message_info(from, &[]),
            lucky_ticket::msg::ExecuteMsg::Transfer {
                recipient: to.to_string(),
                amount: Uint128::new(amount),
            },
        )
        .unwrap();
    }

    fn claim(
        &mut self,
        user: &Addr,
        draw_ids: Vec<u64>,
        picks: Vec<Vec<u64>>,
    ) -> Result<Response, DistributorError> {
        lucky_prize_distributor::contract::execute(
            self.distributor.as_mut(),
            env_at(self.clock.get()),
            message_info(&addr("relayer"), &[]),
            lucky_prize_distributor::msg::ExecuteMsg::Claim {
                user: user.to_string(),
                draw_ids,
                picks,
            },
        )
    }

    fn query_distributor<T: serde::de::DeserializeOwned>(
        &self,
        msg: lucky_prize_distributor::msg::QueryMsg,
    ) -> T {
        let res = lucky_prize_distributor::contract::query(
            self.distributor.as_ref(),
            env_at(self.clock.get()),
            msg,
        )
        .unwrap();
        from_json(res).unwrap()
    }
}

// ─── Tests ───

#[test]
fn test_end_to_end_claim() {
    let mut suite = Suite::new(ConfigLookup::Exact);
    let alice = addr("alice");
    let bob = addr("bob");

    // 75% / 25% of the supply held for the whole first period
    suite.mint(&alice, 750);
    suite.mint(&bob, 250);

    suite.clock.set(T0 + DAY);
    suite.push_draw(draw(1, won_by(&alice, 0)));
    suite.push_prize_config(1, prize_config());
    suite.clock.set(T0 + DAY + 60);

    let shares: Vec<Uint256> =
        suite.query_distributor(lucky_prize_distributor::msg::QueryMsg::NormalizedBalances {
            user: alice.to_string(),
            draw_ids: vec![1],
        });
    assert_eq!(shares, vec![Uint256::from(750_000_000_000_000_000u128)]);

    let res = suite.claim(&alice, vec![1], vec![vec![0]]).unwrap();
    assert_eq!(sent(&res), Some((alice.to_string(), Uint128::new(500))));

    // second identical claim is a no-op
    let res = suite.claim(&alice, vec![1], vec![vec![0]]).unwrap();
    assert_eq!(sent(&res), None);

    let paid: Uint128 =
        suite.query_distributor(lucky_prize_distributor::msg::QueryMsg::DrawPayout {
            address: alice.to_string(),
            draw_id: 1,
        });
    assert_eq!(paid, Uint128::new(500));

    // 25% of 4 picks leaves bob a single pick
    let err = suite.claim(&bob, vec![1], vec![vec![1]]).unwrap_err();
    assert!(matches!(
        err,
        DistributorError::Calculator(CalculatorError::InsufficientPicks {
            pick: 1,
            allotted: 1
        })
    ));
}

#[test]
fn test_late_deposit_has_no_share_of_past_draw() {
    let mut suite = Suite::new(ConfigLookup::Exact);
    let alice = addr("alice");
    let carol = addr("carol");

    suite.mint(&alice, 1_000);
    suite.clock.set(T0 + DAY);
    suite.push_draw(draw(1, won_by(&carol, 0)));
    suite.push_prize_config(1, prize_config());

    // carol joins after the balance window of draw 1 closed
    suite.clock.set(T0 + DAY + 10);
    suite.mint(&carol, 1_000);

    let shares: Vec<Uint256> =
        suite.query_distributor(lucky_prize_distributor::msg::QueryMsg::NormalizedBalances {
            user: carol.to_string(),
            draw_ids: vec![1],
        });
    assert_eq!(shares, vec![Uint256::zero()]);

    let err = suite.claim(&carol, vec![1], vec![vec![0]]).unwrap_err();
    assert!(matches!(
        err,
        DistributorError::Calculator(CalculatorError::InsufficientPicks { allotted: 0, .. })
    ));
}

#[test]
fn test_transfer_moves_future_share() {
    let mut suite = Suite::new(ConfigLookup::Exact);
    let alice = addr("alice");
    let bob = addr("bob");

    suite.mint(&alice, 1_000);
    suite.clock.set(T0 + DAY);
    suite.push_draw(draw(1, won_by(&bob, 0)));
    suite.push_prize_config(1, prize_config());

    // bob holds everything during draw 2's window
    suite.transfer(&alice, &bob, 1_000);
    suite.clock.set(T0 + 2 * DAY);
    suite.push_draw(draw(2, won_by(&bob, 0)));
    suite.push_prize_config(2, prize_config());
    suite.clock.set(T0 + 2 * DAY + 1);

    let preview: CalculatePrizesResponse =
        suite.query_distributor(lucky_prize_distributor::msg::QueryMsg::CalculatePrizes {
            user: bob.to_string(),
            draw_ids: vec![2],
            picks: vec![vec![0]],
        });
    assert_eq!(preview.draws[0].total_user_picks, 4);
    assert_eq!(preview.claimable, Uint128::new(500));

    assert!(suite.claim(&bob, vec![1], vec![vec![0]]).is_err());
    let res = suite.claim(&bob, vec![2], vec![vec![0]]).unwrap();
    assert_eq!(sent(&res), Some((bob.to_string(), Uint128::new(500))));
}

#[test]
fn test_claim_window_follows_newest_draw() {
    let mut suite = Suite::new(ConfigLookup::Exact);
    let alice = addr("alice");
    suite.mint(&alice, 1_000);

    for draw_id in 1..=10u64 {
        suite.clock.set(T0 + draw_id * DAY);
        suite.push_draw(draw(draw_id, won_by(&alice, 0)));
        suite.push_prize_config(draw_id, prize_config());
    }

    let err = suite.claim(&alice, vec![2], vec![vec![0]]).unwrap_err();
    assert!(matches!(
        err,
        DistributorError::DrawIdOutOfRange {
            draw_id: 2,
            oldest: 3,
            newest: 10
        }
    ));

    let res = suite
        .claim(&alice, vec![10, 3], vec![vec![0], vec![0]])
        .unwrap();
    assert_eq!(sent(&res), Some((alice.to_string(), Uint128::new(1_000))));
}

#[test]
fn test_latest_config_applies_to_later_draws() {
    let mut suite = Suite::new(ConfigLookup::LatestAtOrBefore);
    let alice = addr("alice");
    suite.mint(&alice, 1_000);

    // one config covers draws 1 and 2, a larger prize starts at draw 3
    suite.push_prize_config(1, prize_config());
    let mut bigger = prize_config();
    bigger.prize = Uint128::new(4_000);
    suite.push_prize_config(3, bigger);

    for draw_id in 1..=3u64 {
        suite.clock.set(T0 + draw_id * DAY);
        suite.push_draw(draw(draw_id, won_by(&alice, 0)));
    }

    let res = suite
        .claim(&alice, vec![1, 2, 3], vec![vec![0], vec![0], vec![0]])
        .unwrap();
    assert_eq!(
        sent(&res),
        Some((alice.to_string(), Uint128::new(500 + 500 + 2_000)))
    );
}
