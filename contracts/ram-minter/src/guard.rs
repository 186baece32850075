use crate::state::State;
use commons::CustomContractError;
use concordium_std::*;

/// Runs `body` with the minter locked against reentrant calls.
///
/// The lock is released on every exit of `body`, rejections included.
pub fn non_reentrant<S, H, T, F>(host: &mut H, body: F) -> ReceiveResult<T>
where
    S: HasStateApi,
    H: HasHost<State<S>, StateApiType = S>,
    F: FnOnce(&mut H) -> ReceiveResult<T>,
{
    ensure!(
        !host.state().locked,
        CustomContractError::ReentrantCall.into()
    );
    host.state_mut().locked = true;
    let result = body(host);
    host.state_mut().locked = false;
    result
}
