use crate::core::battle::{
    keep_current_combatant, open_switch_window, resolve_round, select_combatant, select_opponent,
};
use crate::core::factory::create_combatant;
use crate::core::scoring::battle_summary;
use crate::core::state::{create_battle_state, BattleState, Combatant};
use crate::core::utils::available_indices;
use crate::data::catalog::CatalogEntry;
use crate::data::type_chart::effectiveness;
use crate::wire::{BattleStateWire, BattleSummaryWire, CombatantWire};
use js_sys::Math;
use wasm_bindgen::prelude::*;

fn js_err(message: impl ToString) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn state_from_js(state: JsValue) -> Result<BattleState, JsValue> {
    let state_wire: BattleStateWire = serde_wasm_bindgen::from_value(state).map_err(js_err)?;
    BattleState::try_from(state_wire).map_err(js_err)
}

fn state_to_js(state: BattleState) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&BattleStateWire::from(state)).map_err(js_err)
}

#[wasm_bindgen(js_name = initializeBattle)]
pub fn initialize_battle_wasm(player_roster: JsValue, opponent_roster: JsValue) -> Result<JsValue, JsValue> {
    let player: Vec<CombatantWire> = serde_wasm_bindgen::from_value(player_roster).map_err(js_err)?;
    let opponent: Vec<CombatantWire> = serde_wasm_bindgen::from_value(opponent_roster).map_err(js_err)?;
    let state = create_battle_state(
        player.into_iter().map(Combatant::from).collect(),
        opponent.into_iter().map(Combatant::from).collect(),
    );
    state_to_js(state)
}

#[wasm_bindgen(js_name = selectCombatant)]
pub fn select_combatant_wasm(state: JsValue, index: usize) -> Result<JsValue, JsValue> {
    let state = state_from_js(state)?;
    state_to_js(select_combatant(&state, index))
}

#[wasm_bindgen(js_name = selectOpponent)]
pub fn select_opponent_wasm(state: JsValue) -> Result<JsValue, JsValue> {
    let state = state_from_js(state)?;
    state_to_js(select_opponent(&state))
}

#[wasm_bindgen(js_name = openSwitchWindow)]
pub fn open_switch_window_wasm(state: JsValue) -> Result<JsValue, JsValue> {
    let state = state_from_js(state)?;
    state_to_js(open_switch_window(&state))
}

#[wasm_bindgen(js_name = keepCurrentCombatant)]
pub fn keep_current_combatant_wasm(state: JsValue) -> Result<JsValue, JsValue> {
    let state = state_from_js(state)?;
    state_to_js(keep_current_combatant(&state))
}

#[wasm_bindgen(js_name = resolveRound)]
pub fn resolve_round_wasm(state: JsValue, move_type: Option<String>) -> Result<JsValue, JsValue> {
    let state = state_from_js(state)?;
    let mut rng = || Math::random();
    state_to_js(resolve_round(&state, move_type.as_deref(), &mut rng))
}

#[wasm_bindgen(js_name = getTypeEffectiveness)]
pub fn get_type_effectiveness_wasm(attack_type: String, defender_types: JsValue) -> Result<f64, JsValue> {
    let defender_types: Vec<String> = serde_wasm_bindgen::from_value(defender_types).map_err(js_err)?;
    Ok(effectiveness(&attack_type, &defender_types))
}

#[wasm_bindgen(js_name = convertCatalogEntry)]
pub fn convert_catalog_entry_wasm(entry: JsValue) -> Result<JsValue, JsValue> {
    let entry: CatalogEntry = serde_wasm_bindgen::from_value(entry).map_err(js_err)?;
    serde_wasm_bindgen::to_value(&CombatantWire::from(create_combatant(&entry))).map_err(js_err)
}

#[wasm_bindgen(js_name = availableCombatants)]
pub fn available_combatants_wasm(state: JsValue) -> Result<JsValue, JsValue> {
    let state = state_from_js(state)?;
    serde_wasm_bindgen::to_value(&available_indices(&state.player_roster)).map_err(js_err)
}

#[wasm_bindgen(js_name = battleSummary)]
pub fn battle_summary_wasm(state: JsValue) -> Result<JsValue, JsValue> {
    let state = state_from_js(state)?;
    serde_wasm_bindgen::to_value(&BattleSummaryWire::from(battle_summary(&state))).map_err(js_err)
}
